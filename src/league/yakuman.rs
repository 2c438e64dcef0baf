use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Named limit hands that can be recorded against a player in a hand.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Yakuman {
    Kokushi,
    Suuankou,
    Daisangen,
    Ryuuiisou,
    Tsuuiisou,
    Chinroutou,
    Chuuren,
    Suukantsu,
    Tenhou,
    Chiihou,
    Kokushi13,
    SuuankouTanki,
    JunseiChuuren,
    Daisuushii,
    Shousuushii,
}

impl Yakuman {
    /// Limit hands that can never be scored together with `self`.
    pub fn excludes(self) -> &'static [Yakuman] {
        use Yakuman::*;
        match self {
            Tenhou => &[
                Kokushi, Suuankou, Daisangen, Ryuuiisou, Tsuuiisou, Chinroutou, Chuuren,
                Suukantsu, Chiihou, Kokushi13, SuuankouTanki, JunseiChuuren, Daisuushii,
                Shousuushii,
            ],
            Chiihou => &[
                Kokushi, Suuankou, Daisangen, Ryuuiisou, Tsuuiisou, Chinroutou, Chuuren,
                Suukantsu, Tenhou, Kokushi13, SuuankouTanki, JunseiChuuren, Daisuushii,
                Shousuushii,
            ],
            Kokushi | Kokushi13 => &[
                Suuankou, Daisangen, Ryuuiisou, Tsuuiisou, Chinroutou, Chuuren, Suukantsu,
                Tenhou, Chiihou, SuuankouTanki, JunseiChuuren, Daisuushii, Shousuushii,
            ],
            Chuuren | JunseiChuuren => &[
                Kokushi, Suuankou, Daisangen, Ryuuiisou, Tsuuiisou, Chinroutou, Suukantsu,
                Tenhou, Chiihou, Kokushi13, SuuankouTanki, Daisuushii, Shousuushii,
            ],
            Suukantsu => &[
                Kokushi, Suuankou, Daisangen, Ryuuiisou, Tsuuiisou, Chinroutou, Chuuren,
                Tenhou, Chiihou, Kokushi13, SuuankouTanki, JunseiChuuren, Daisuushii,
                Shousuushii,
            ],
            Suuankou | SuuankouTanki => &[Kokushi, Chuuren, Suukantsu, Kokushi13, JunseiChuuren],
            Daisangen => &[
                Kokushi, Chuuren, Suukantsu, Ryuuiisou, Chinroutou, Kokushi13, JunseiChuuren,
            ],
            Tsuuiisou => &[Kokushi, Chuuren, Ryuuiisou, Chinroutou, Kokushi13, JunseiChuuren],
            Ryuuiisou => &[
                Kokushi, Chuuren, Daisangen, Tsuuiisou, Chinroutou, Kokushi13, JunseiChuuren,
                Daisuushii, Shousuushii,
            ],
            Chinroutou => &[
                Kokushi, Chuuren, Daisangen, Tsuuiisou, Ryuuiisou, Kokushi13, JunseiChuuren,
                Daisuushii, Shousuushii,
            ],
            Daisuushii => &[Kokushi, Chuuren, Shousuushii, Kokushi13, JunseiChuuren],
            Shousuushii => &[Kokushi, Chuuren, Daisuushii, Kokushi13, JunseiChuuren],
        }
    }

    pub fn is_compatible_with(self, other: Yakuman) -> bool {
        !self.excludes().contains(&other) && !other.excludes().contains(&self)
    }
}

/// Returns the first pair of mutually exclusive limit hands in `set`, if any.
pub fn first_conflict<'a, I>(set: I) -> Option<(Yakuman, Yakuman)>
where
    I: IntoIterator<Item = &'a Yakuman>,
{
    let kinds: Vec<Yakuman> = set.into_iter().copied().collect();
    kinds.iter().enumerate().find_map(|(i, &first)| {
        kinds[i + 1..]
            .iter()
            .find(|&&second| !first.is_compatible_with(second))
            .map(|&second| (first, second))
    })
}
