use serde::Serialize;

/// Reference entry: a crop and its recommended pesticide treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub pesticide: &'static str,
    pub amount: &'static str,
    pub frequency: &'static str,
}

const fn plant(
    name: &'static str,
    kind: &'static str,
    pesticide: &'static str,
    amount: &'static str,
    frequency: &'static str,
) -> PlantInfo {
    PlantInfo {
        name,
        kind,
        pesticide,
        amount,
        frequency,
    }
}

pub const CATALOG: &[PlantInfo] = &[
    plant("Tomato", "Vegetable", "Neem Oil", "2ml per liter", "Weekly"),
    plant("Wheat", "Grain", "Malathion", "1ml per liter", "Bi-weekly"),
    plant("Rice", "Grain", "Chlorpyrifos", "1.5ml per liter", "Monthly"),
    plant("Corn", "Grain", "Atrazine", "2.5ml per liter", "Bi-weekly"),
    plant("Potato", "Vegetable", "Copper Sulfate", "3ml per liter", "Weekly"),
    plant("Cotton", "Cash Crop", "Bt Spray", "5ml per liter", "Bi-weekly"),
];

/// Case-insensitive substring match on name or type. Empty term matches all.
pub fn search(term: &str) -> Vec<&'static PlantInfo> {
    let term = term.to_lowercase();
    CATALOG
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&term) || p.kind.to_lowercase().contains(&term))
        .collect()
}
