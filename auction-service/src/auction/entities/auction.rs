use {
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl AuctionStatus {
    /// The only status a record may be in for a transition to `self` to apply.
    pub fn predecessor(&self) -> Option<AuctionStatus> {
        match self {
            AuctionStatus::Active => None,
            AuctionStatus::Completed => Some(AuctionStatus::Active),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
}

impl Auction {
    pub fn new(
        product_name: String,
        category: String,
        description: String,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_name,
            category,
            description,
            condition,
            status: AuctionStatus::Active,
            creation_time: OffsetDateTime::now_utc(),
        }
    }
}
