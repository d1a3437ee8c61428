use crate::model::score::FactorScore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub rank: u8,
    pub lower: Bound,
    pub upper: Bound,
}

impl Bucket {
    pub fn contains(&self, x: f64) -> bool {
        let above = match self.lower {
            Bound::Inclusive(lo) => x >= lo,
            Bound::Exclusive(lo) => x > lo,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Inclusive(hi) => x <= hi,
            Bound::Exclusive(hi) => x < hi,
            Bound::Unbounded => true,
        };
        above && below
    }
}

/// Ten ordered rank buckets for one risk factor. The first bucket containing
/// the value wins; values between buckets are not scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketTable {
    pub factor: &'static str,
    pub weight: f64,
    pub buckets: &'static [Bucket],
}

impl BucketTable {
    pub fn rank(&self, x: f64) -> Option<u8> {
        self.buckets.iter().find(|b| b.contains(x)).map(|b| b.rank)
    }

    pub fn score(&self, x: f64) -> FactorScore {
        match self.rank(x) {
            Some(rank) => FactorScore::Scored(rank as f64 * self.weight),
            None => FactorScore::NotComputable,
        }
    }
}

const fn closed(rank: u8, lo: f64, hi: f64) -> Bucket {
    Bucket {
        rank,
        lower: Bound::Inclusive(lo),
        upper: Bound::Inclusive(hi),
    }
}

const fn left_open(rank: u8, lo: f64, hi: f64) -> Bucket {
    Bucket {
        rank,
        lower: Bound::Exclusive(lo),
        upper: Bound::Inclusive(hi),
    }
}

const fn above(rank: u8, lo: f64) -> Bucket {
    Bucket {
        rank,
        lower: Bound::Exclusive(lo),
        upper: Bound::Unbounded,
    }
}

const fn at_least(rank: u8, lo: f64) -> Bucket {
    Bucket {
        rank,
        lower: Bound::Inclusive(lo),
        upper: Bound::Unbounded,
    }
}

pub const NCD_WEIGHT: f64 = 0.25;
pub const AGE_WEIGHT: f64 = 0.35;
pub const VEHICLE_VALUE_WEIGHT: f64 = 0.15;
pub const ADDRESS_WEIGHT: f64 = 0.25;

pub static NCD_YEARS: BucketTable = BucketTable {
    factor: "ncd_years",
    weight: NCD_WEIGHT,
    buckets: &[
        closed(10, 0.0, 2.0),
        left_open(9, 2.0, 4.0),
        left_open(8, 4.0, 6.0),
        left_open(7, 6.0, 8.0),
        left_open(6, 8.0, 10.0),
        left_open(5, 10.0, 12.0),
        left_open(4, 12.0, 14.0),
        left_open(3, 14.0, 16.0),
        left_open(2, 16.0, 18.0),
        above(1, 18.0),
    ],
};

// Youngest and oldest drivers carry the highest ranks. Nothing scores in
// [82.8, 82.81).
pub static AGE: BucketTable = BucketTable {
    factor: "age",
    weight: AGE_WEIGHT,
    buckets: &[
        closed(10, 14.0, 25.2),
        left_open(7, 25.2, 32.4),
        left_open(5, 32.4, 39.6),
        left_open(3, 39.6, 46.8),
        left_open(1, 46.8, 54.0),
        left_open(2, 54.0, 61.2),
        left_open(4, 61.2, 68.4),
        left_open(6, 68.4, 75.6),
        Bucket {
            rank: 8,
            lower: Bound::Exclusive(75.6),
            upper: Bound::Exclusive(82.8),
        },
        at_least(9, 82.81),
    ],
};

// Nothing scores in (5000, 5000.2) or (45000, 45000.01).
pub static VEHICLE_VALUE: BucketTable = BucketTable {
    factor: "vehicle_value",
    weight: VEHICLE_VALUE_WEIGHT,
    buckets: &[
        closed(1, 0.0, 5000.0),
        closed(2, 5000.2, 10000.0),
        left_open(3, 10000.0, 15000.0),
        left_open(4, 15000.0, 20000.0),
        left_open(5, 20000.0, 25000.0),
        left_open(6, 25000.0, 30000.0),
        left_open(7, 30000.0, 35000.0),
        left_open(8, 35000.0, 40000.0),
        left_open(9, 40000.0, 45000.0),
        at_least(10, 45000.01),
    ],
};

/// Distance to the nearest branch in miles.
pub static ADDRESS_DISTANCE: BucketTable = BucketTable {
    factor: "address_distance",
    weight: ADDRESS_WEIGHT,
    buckets: &[
        closed(1, 0.0, 10.0),
        left_open(2, 10.0, 20.0),
        left_open(3, 20.0, 30.0),
        left_open(4, 30.0, 40.0),
        left_open(5, 40.0, 50.0),
        left_open(6, 50.0, 60.0),
        left_open(7, 60.0, 70.0),
        left_open(8, 70.0, 80.0),
        left_open(9, 80.0, 90.0),
        above(10, 90.0),
    ],
};

#[cfg(test)]
#[path = "../../tests/src_inline/model/buckets.rs"]
mod tests;
