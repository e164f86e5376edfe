use crate::{
    db_types::{NewSubscription, Subscription, SubscriptionUpdate},
    traits::{DatabaseError, SubscriptionQueryFilter},
};

#[allow(async_fn_in_trait)]
pub trait SubscriptionManagement {
    async fn fetch_subscription(&self, id: i64) -> Result<Option<Subscription>, DatabaseError>;

    async fn fetch_subscription_by_url_and_key(
        &self,
        url: &str,
        key: &str,
    ) -> Result<Option<Subscription>, DatabaseError>;

    /// Inserts a new `pending` subscription. Returns [`DatabaseError::AlreadyExists`] if the (url, key) pair is taken.
    async fn insert_subscription(&self, subscription: NewSubscription) -> Result<Subscription, DatabaseError>;

    /// Fetches subscriptions matching every criterion in the filter, oldest first.
    async fn search_subscriptions(&self, query: SubscriptionQueryFilter) -> Result<Vec<Subscription>, DatabaseError>;

    async fn update_subscription(&self, id: i64, update: SubscriptionUpdate) -> Result<Subscription, DatabaseError>;

    async fn delete_subscription(&self, id: i64) -> Result<(), DatabaseError>;
}
