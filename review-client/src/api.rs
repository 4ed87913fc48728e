//! Review backend endpoints
//!
//! `ReviewBackend` is the seam between the desk and the network: the
//! HTTP implementation lives here, tests can supply their own.

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use review_core::{TransitionBody, TransitionRequest};
use serde::Deserialize;
use serde_json::Value;
use shared::{Company, Machine, OrderDetail, OrderSummary, ReviewList, ReviewStats, Vehicle};

/// List endpoints answer either a bare array or an object wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "orders", alias = "data", alias = "results")]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn stats_summary(&self) -> ClientResult<ReviewStats>;

    async fn list(&self, list: ReviewList) -> ClientResult<Vec<OrderSummary>>;

    async fn order_detail(&self, order_id: i64) -> ClientResult<OrderDetail>;

    /// Send a planned transition to its endpoint
    async fn execute(&self, request: &TransitionRequest) -> ClientResult<()>;

    async fn companies(&self) -> ClientResult<Vec<Company>>;

    async fn machines(&self) -> ClientResult<Vec<Machine>>;

    async fn vehicles(&self) -> ClientResult<Vec<Vehicle>>;
}

impl HttpClient {
    async fn get_listing<T: serde::de::DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        Ok(self.get::<Listing<T>>(path).await?.into_vec())
    }
}

#[async_trait]
impl ReviewBackend for HttpClient {
    async fn stats_summary(&self) -> ClientResult<ReviewStats> {
        self.get("review/stats/summary").await
    }

    async fn list(&self, list: ReviewList) -> ClientResult<Vec<OrderSummary>> {
        self.get_listing(&format!("review/{}", list.path())).await
    }

    async fn order_detail(&self, order_id: i64) -> ClientResult<OrderDetail> {
        self.get(&format!("review/{order_id}")).await
    }

    async fn execute(&self, request: &TransitionRequest) -> ClientResult<()> {
        let path = request.path();
        let _: Value = match &request.body {
            TransitionBody::Review(payload) => self.post(&path, payload).await?,
            TransitionBody::Reason(reason) => self.post(&path, reason).await?,
            TransitionBody::Empty => self.post_empty(&path).await?,
        };
        tracing::info!(
            order_id = request.order_id,
            action = request.action.name(),
            to = %request.to,
            "Transition accepted"
        );
        Ok(())
    }

    async fn companies(&self) -> ClientResult<Vec<Company>> {
        self.get_listing("companies").await
    }

    async fn machines(&self) -> ClientResult<Vec<Machine>> {
        self.get_listing("machines").await
    }

    async fn vehicles(&self) -> ClientResult<Vec<Vehicle>> {
        self.get_listing("vehicles").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_shapes() {
        let bare: Listing<Company> =
            serde_json::from_str(r#"[{"id": 1, "name": "Alfa"}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: Listing<Company> =
            serde_json::from_str(r#"{"items": [{"id": 1}, {"id": 2}]}"#).unwrap();
        assert_eq!(wrapped.into_vec().len(), 2);

        let aliased: Listing<Vehicle> =
            serde_json::from_str(r#"{"data": [{"id": 3, "name": "Strada", "plate": "ABC1D23"}]}"#)
                .unwrap();
        assert_eq!(aliased.into_vec()[0].plate.as_deref(), Some("ABC1D23"));
    }
}
