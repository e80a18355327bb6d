/// Value used for any CDP label outside [`CDP_TABLE`], and for no label at all.
/// Sits at the `C` grade: neither rewarded nor penalised.
pub const UNMAPPED_CDP_NORM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CdpRating {
    A,
    AMinus,
    B,
    C,
    D,
}

pub const CDP_TABLE: [(CdpRating, &str, f64); 5] = [
    (CdpRating::A, "A", 1.0),
    (CdpRating::AMinus, "A-", 0.9),
    (CdpRating::B, "B", 0.7),
    (CdpRating::C, "C", 0.5),
    (CdpRating::D, "D", 0.3),
];

impl CdpRating {
    /// Exact, case-sensitive match on the published label.
    pub fn parse(label: &str) -> Option<Self> {
        CDP_TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(rating, _, _)| *rating)
    }

    pub fn norm(self) -> f64 {
        CDP_TABLE
            .iter()
            .find(|(rating, _, _)| *rating == self)
            .map_or(UNMAPPED_CDP_NORM, |(_, _, norm)| *norm)
    }
}

pub fn cdp_norm(label: Option<&str>) -> f64 {
    label
        .and_then(CdpRating::parse)
        .map_or(UNMAPPED_CDP_NORM, CdpRating::norm)
}
