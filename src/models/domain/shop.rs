use serde::Serialize;

/// Something a player can unlock by spending experience points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: i64,
}

pub const SHOP_ITEMS: [ShopItem; 3] = [
    ShopItem {
        id: "crystal_water",
        name: "Crystal Water",
        description: "Instant 20% Growth Boost",
        cost: 300,
    },
    ShopItem {
        id: "golden_leaves",
        name: "Golden Leaves",
        description: "Exclusive Profile Aura",
        cost: 800,
    },
    ShopItem {
        id: "twin_node",
        name: "Twin Node",
        description: "Double XP for 24 hours",
        cost: 1500,
    },
];

pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}
