#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Predictor {
    Left = 1,
    Above = 2,
    MeanLeftAbove = 3,
    Linear = 4,
    JpegLs = 5,
}

impl Predictor {
    pub const ALL: [Predictor; 5] = [
        Predictor::Left,
        Predictor::Above,
        Predictor::MeanLeftAbove,
        Predictor::Linear,
        Predictor::JpegLs,
    ];

    pub fn from_u8(n: u8) -> Option<Predictor> {
        match n {
            1 => Some(Predictor::Left),
            2 => Some(Predictor::Above),
            3 => Some(Predictor::MeanLeftAbove),
            4 => Some(Predictor::Linear),
            5 => Some(Predictor::JpegLs),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            Predictor::Left => "left neighbor (A)",
            Predictor::Above => "above neighbor (B)",
            Predictor::MeanLeftAbove => "mean of A and B",
            Predictor::Linear => "linear (A + B - C)",
            Predictor::JpegLs => "JPEG-LS simple (adaptive)",
        }
    }
}
