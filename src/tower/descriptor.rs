use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TowerDescriptor {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tier: u32,
}

impl TowerDescriptor {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        tier: u32,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            tier,
        }
    }

    pub fn label(&self) -> &str {
        let symbol = self.symbol.trim();
        if symbol.is_empty() { &self.id } else { symbol }
    }
}
