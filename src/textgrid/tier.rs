/// One labeled interval on a tier. `xmin`/`xmax` are seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub xmin: f64,
    pub xmax: f64,
    pub text: String,
}

/// One interval tier: a named, ordered sequence of intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub name: String,
    pub xmin: f64,
    pub xmax: f64,
    pub intervals: Vec<Interval>,
}

/// A parsed TextGrid file: global bounds plus interval tiers in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<Tier>,
}
