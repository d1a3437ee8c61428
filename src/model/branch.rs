use crate::model::geo::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    pub coordinates: Option<Coordinates>,
}
