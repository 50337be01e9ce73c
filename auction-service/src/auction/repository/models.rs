#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::kernel::db::DB,
    async_trait::async_trait,
    sqlx::{
        FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::OffsetDateTime,
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "snake_case")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

/// Stored form of an auction. `creation_time` is kept in unix seconds.
#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Auction {
    pub id:            String,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: i64,
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:            auction.id.clone(),
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.unix_timestamp(),
        }
    }
}

impl TryFrom<Auction> for entities::Auction {
    type Error = anyhow::Error;

    fn try_from(auction: Auction) -> Result<Self, Self::Error> {
        let creation_time =
            OffsetDateTime::from_unix_timestamp(auction.creation_time).map_err(|e| {
                anyhow::anyhow!(
                    "Invalid creation time {} for auction {}: {:?}",
                    auction.creation_time,
                    auction.id,
                    e
                )
            })?;
        Ok(Self {
            id: auction.id,
            product_name: auction.product_name,
            category: auction.category,
            description: auction.description,
            condition: auction.condition.into(),
            status: auction.status.into(),
            creation_time,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub status:       Option<AuctionStatus>,
    pub category:     Option<String>,
    /// Case-insensitive substring of the product name.
    pub product_name: Option<String>,
}

/// Escapes `LIKE` wildcards so the value matches literally.
fn escape_like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &Auction) -> anyhow::Result<()>;
    async fn get_auction(&self, auction_id: &entities::AuctionId)
        -> anyhow::Result<Option<Auction>>;
    async fn get_auctions(&self, filter: &AuctionFilter) -> anyhow::Result<Vec<Auction>>;
    /// All auctions in `status` created strictly before `created_before` (unix seconds).
    async fn get_expired_auctions(
        &self,
        status: AuctionStatus,
        created_before: i64,
    ) -> anyhow::Result<Vec<Auction>>;
    /// Sets `to` on the auction only if it is currently in `from`.
    /// Returns false when no record matched.
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> anyhow::Result<bool>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &Auction) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&auction.id)
        .bind(&auction.product_name)
        .bind(&auction.category)
        .bind(&auction.description)
        .bind(auction.condition)
        .bind(auction.status)
        .bind(auction.creation_time)
        .execute(self)
        .await
        .inspect_err(|_| {
            tracing::Span::current().record("result", "error");
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> anyhow::Result<Option<Auction>> {
        let auction: Option<Auction> = sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auction)
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auctions(&self, filter: &AuctionFilter) -> anyhow::Result<Vec<Auction>> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        if let Some(category) = filter.category.clone() {
            query.push(" AND category = ");
            query.push_bind(category);
        }
        if let Some(product_name) = filter.product_name.clone() {
            query.push(" AND product_name ILIKE ");
            query.push_bind(format!("%{}%", escape_like_pattern(&product_name)));
            query.push(" ESCAPE '\\'");
        }
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(auctions)
    }

    #[instrument(
        target = "metrics",
        name = "db_get_expired_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_expired_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_expired_auctions(
        &self,
        status: AuctionStatus,
        created_before: i64,
    ) -> anyhow::Result<Vec<Auction>> {
        let auctions: Vec<Auction> =
            sqlx::query_as("SELECT * FROM auction WHERE status = $1 AND creation_time < $2")
                .bind(status)
                .bind(created_before)
                .fetch_all(self)
                .await
                .inspect_err(|_| {
                    tracing::Span::current().record("result", "error");
                })?;
        Ok(auctions)
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(
            category = "db_queries",
            result = "success",
            name = "update_auction_status",
            tracing_enabled
        ),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: &entities::AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
            .bind(to)
            .bind(auction_id)
            .bind(from)
            .execute(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(result.rows_affected() > 0)
    }
}
