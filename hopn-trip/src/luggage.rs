use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TripError;

/// Largest count the primary luggage stepper allows
pub const MAX_STANDARD_COUNT: u32 = 8;

/// Largest count per oversized kind
pub const MAX_OVERSIZED_COUNT: u32 = 8;

/// Bag sizes offered by the primary luggage editor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StandardSize {
    XL,
    L,
    M,
    S,
    #[serde(rename = "Carry-on")]
    CarryOn,
}

impl StandardSize {
    pub const ALL: [StandardSize; 5] = [
        StandardSize::XL,
        StandardSize::L,
        StandardSize::M,
        StandardSize::S,
        StandardSize::CarryOn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StandardSize::XL => "XL",
            StandardSize::L => "L",
            StandardSize::M => "M",
            StandardSize::S => "S",
            StandardSize::CarryOn => "Carry-on",
        }
    }
}

impl FromStr for StandardSize {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| TripError::InvalidLuggage(format!("unknown size '{}'", s)))
    }
}

/// Items too large for a standard bag slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum OversizedKind {
    Bicycles,
    Golf,
    Snowboard,
    Ski,
    Surfboard,
    Sports,
    Hockey,
    Music,
}

impl OversizedKind {
    pub const ALL: [OversizedKind; 8] = [
        OversizedKind::Bicycles,
        OversizedKind::Golf,
        OversizedKind::Snowboard,
        OversizedKind::Ski,
        OversizedKind::Surfboard,
        OversizedKind::Sports,
        OversizedKind::Hockey,
        OversizedKind::Music,
    ];

    /// Wire key, also used as the entry title when the merge creates one
    pub fn as_str(&self) -> &'static str {
        match self {
            OversizedKind::Bicycles => "bicycles",
            OversizedKind::Golf => "golf",
            OversizedKind::Snowboard => "snowboard",
            OversizedKind::Ski => "ski",
            OversizedKind::Surfboard => "surfboard",
            OversizedKind::Sports => "sports",
            OversizedKind::Hockey => "hockey",
            OversizedKind::Music => "music",
        }
    }

    /// Row label in the oversized items list
    pub fn display_title(&self) -> &'static str {
        match self {
            OversizedKind::Bicycles => "Bicycles",
            OversizedKind::Golf => "Golf Bags",
            OversizedKind::Snowboard => "Snowboards",
            OversizedKind::Ski => "Skis",
            OversizedKind::Surfboard => "Surfboards",
            OversizedKind::Sports => "Sports Equipment",
            OversizedKind::Hockey => "Hockey Gear",
            OversizedKind::Music => "Musical Instruments",
        }
    }
}

impl fmt::Display for OversizedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OversizedKind {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OversizedKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TripError::InvalidLuggage(format!("unknown oversized item '{}'", s)))
    }
}

/// Complete-intent oversized counts as exchanged with the oversized editor.
/// A kind mapped to 0 means "remove it"; a missing kind means "leave it".
/// Keys keep the order in which they were first touched.
pub type OversizedCounts = IndexMap<OversizedKind, u32>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardLuggage {
    pub size: StandardSize,
    pub count: u32,
    pub weight_kg: Option<f64>,
    pub dims_cm: Option<Dimensions>,
}

impl StandardLuggage {
    pub fn new(size: StandardSize, count: u32) -> Self {
        Self {
            size,
            count,
            weight_kg: None,
            dims_cm: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OversizedLuggage {
    pub subtype: OversizedKind,
    pub title: String,
    pub count: u32,
}

/// One line of the luggage list.
///
/// On the wire both variants share the flat `{size, count, ...}` shape, with
/// `size = "Oversized"` selecting the oversized variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LuggageWire", into = "LuggageWire")]
pub enum LuggageItem {
    Standard(StandardLuggage),
    Oversized(OversizedLuggage),
}

impl LuggageItem {
    pub fn standard(size: StandardSize, count: u32) -> Self {
        LuggageItem::Standard(StandardLuggage::new(size, count))
    }

    pub fn oversized(subtype: OversizedKind, title: impl Into<String>, count: u32) -> Self {
        LuggageItem::Oversized(OversizedLuggage {
            subtype,
            title: title.into(),
            count,
        })
    }

    pub fn count(&self) -> u32 {
        match self {
            LuggageItem::Standard(item) => item.count,
            LuggageItem::Oversized(item) => item.count,
        }
    }

    pub fn subtype(&self) -> Option<OversizedKind> {
        match self {
            LuggageItem::Standard(_) => None,
            LuggageItem::Oversized(item) => Some(item.subtype),
        }
    }

    /// Oversized title, or the size name for standard bags
    pub fn label(&self) -> &str {
        match self {
            LuggageItem::Standard(item) => item.size.as_str(),
            LuggageItem::Oversized(item) => &item.title,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuggageWire {
    size: String,
    count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dims_cm: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

const OVERSIZED_TAG: &str = "Oversized";

impl TryFrom<LuggageWire> for LuggageItem {
    type Error = TripError;

    fn try_from(wire: LuggageWire) -> Result<Self, Self::Error> {
        if wire.size == OVERSIZED_TAG {
            let subtype: OversizedKind = wire
                .subtype
                .as_deref()
                .ok_or_else(|| TripError::InvalidLuggage("oversized item without subtype".to_string()))?
                .parse()?;
            let title = wire.title.unwrap_or_else(|| subtype.as_str().to_string());
            return Ok(LuggageItem::oversized(subtype, title, wire.count));
        }

        Ok(LuggageItem::Standard(StandardLuggage {
            size: wire.size.parse()?,
            count: wire.count,
            weight_kg: wire.weight_kg,
            dims_cm: wire.dims_cm,
        }))
    }
}

impl From<LuggageItem> for LuggageWire {
    fn from(item: LuggageItem) -> Self {
        match item {
            LuggageItem::Standard(item) => LuggageWire {
                size: item.size.as_str().to_string(),
                count: item.count,
                weight_kg: item.weight_kg,
                dims_cm: item.dims_cm,
                subtype: None,
                title: None,
            },
            LuggageItem::Oversized(item) => LuggageWire {
                size: OVERSIZED_TAG.to_string(),
                count: item.count,
                weight_kg: None,
                dims_cm: None,
                subtype: Some(item.subtype.as_str().to_string()),
                title: Some(item.title),
            },
        }
    }
}

/// Sum oversized counts per kind. Kinds that do not appear are omitted.
pub fn counts_from_luggage(items: &[LuggageItem]) -> OversizedCounts {
    let mut counts = OversizedCounts::new();
    for item in items {
        if let LuggageItem::Oversized(item) = item {
            let total = counts.entry(item.subtype).or_insert(0);
            *total = total.saturating_add(item.count);
        }
    }
    counts
}

/// Fold a complete-intent counts mapping into a luggage list.
///
/// Kinds with a positive count are written in place (or appended in the order
/// of `counts`); kinds mapped to 0 are removed; kinds absent from `counts` are
/// left untouched.
/// Applying the same `counts` twice gives the same list.
pub fn merge_oversized(base: &[LuggageItem], counts: &OversizedCounts) -> Vec<LuggageItem> {
    let mut items = base.to_vec();

    for (&kind, &count) in counts {
        let first = items.iter().position(|item| item.subtype() == Some(kind));

        if count == 0 {
            items.retain(|item| item.subtype() != Some(kind));
            continue;
        }

        let entry = LuggageItem::oversized(kind, kind.as_str(), count);
        match first {
            Some(pos) => {
                items[pos] = entry;
                // Collapse any duplicate entries for the same kind
                let mut seen = false;
                items.retain(|item| {
                    if item.subtype() != Some(kind) {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => items.push(entry),
        }
    }

    items
}

/// "Label count · Label count" in list order
pub fn summarize_luggage(items: &[LuggageItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", item.label(), item.count()))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Replace the single standard entry. `None` or a zero count removes it.
/// The standard entry is kept ahead of the oversized ones.
pub fn set_primary(items: &[LuggageItem], primary: Option<StandardLuggage>) -> Vec<LuggageItem> {
    let mut out: Vec<LuggageItem> = Vec::with_capacity(items.len() + 1);
    if let Some(primary) = primary.filter(|p| p.count > 0) {
        out.push(LuggageItem::Standard(primary));
    }
    out.extend(
        items
            .iter()
            .filter(|item| matches!(item, LuggageItem::Oversized(_)))
            .cloned(),
    );
    out
}

/// The standard entry, if one is present
pub fn primary(items: &[LuggageItem]) -> Option<&StandardLuggage> {
    items.iter().find_map(|item| match item {
        LuggageItem::Standard(item) => Some(item),
        LuggageItem::Oversized(_) => None,
    })
}

/// Drop zero-count entries; they are considered absent
pub fn normalize_luggage(items: &[LuggageItem]) -> Vec<LuggageItem> {
    items.iter().filter(|item| item.count() > 0).cloned().collect()
}

pub fn total_pieces(items: &[LuggageItem]) -> u32 {
    items.iter().fold(0, |total, item| total.saturating_add(item.count()))
}

pub fn oversized_pieces(items: &[LuggageItem]) -> u32 {
    items
        .iter()
        .filter(|item| item.subtype().is_some())
        .fold(0, |total, item| total.saturating_add(item.count()))
}

/// Check counts against the stepper limits: at most one standard entry with
/// up to [`MAX_STANDARD_COUNT`] bags, and up to [`MAX_OVERSIZED_COUNT`] per
/// oversized entry.
pub fn validate_luggage(items: &[LuggageItem]) -> Result<(), TripError> {
    let mut standard = 0;
    for item in items {
        match item {
            LuggageItem::Standard(bag) => {
                standard += 1;
                if bag.count > MAX_STANDARD_COUNT {
                    return Err(TripError::InvalidLuggage(format!("at most {} standard bags", MAX_STANDARD_COUNT)));
                }
            }
            LuggageItem::Oversized(bag) if bag.count > MAX_OVERSIZED_COUNT => {
                return Err(TripError::InvalidLuggage(format!(
                    "at most {} {} items",
                    MAX_OVERSIZED_COUNT, bag.subtype
                )));
            }
            LuggageItem::Oversized(_) => {}
        }
    }
    if standard > 1 {
        return Err(TripError::InvalidLuggage("only one standard bag size can be chosen".to_string()));
    }
    Ok(())
}

pub fn validate_oversized(counts: &OversizedCounts) -> Result<(), TripError> {
    match counts.iter().find(|(_, &count)| count > MAX_OVERSIZED_COUNT) {
        Some((kind, _)) => Err(TripError::InvalidLuggage(format!(
            "at most {} {} items",
            MAX_OVERSIZED_COUNT, kind
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(OversizedKind, u32)]) -> OversizedCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_merge_add_then_replace() {
        let first = merge_oversized(&[], &counts(&[(OversizedKind::Golf, 2)]));
        assert_eq!(first, vec![LuggageItem::oversized(OversizedKind::Golf, "golf", 2)]);

        let second = merge_oversized(
            &first,
            &counts(&[(OversizedKind::Golf, 0), (OversizedKind::Bicycles, 1)]),
        );
        assert_eq!(second, vec![LuggageItem::oversized(OversizedKind::Bicycles, "bicycles", 1)]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = vec![
            LuggageItem::standard(StandardSize::L, 1),
            LuggageItem::oversized(OversizedKind::Ski, "ski", 1),
            LuggageItem::oversized(OversizedKind::Music, "music", 3),
        ];
        let c = counts(&[
            (OversizedKind::Ski, 0),
            (OversizedKind::Golf, 2),
            (OversizedKind::Music, 1),
        ]);
        let once = merge_oversized(&base, &c);
        let twice = merge_oversized(&once, &c);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_count_removes_every_entry_of_kind() {
        let base = vec![
            LuggageItem::oversized(OversizedKind::Golf, "golf", 1),
            LuggageItem::standard(StandardSize::M, 2),
            LuggageItem::oversized(OversizedKind::Golf, "golf", 4),
        ];
        let merged = merge_oversized(&base, &counts(&[(OversizedKind::Golf, 0)]));
        assert!(merged.iter().all(|item| item.subtype() != Some(OversizedKind::Golf)));
        assert_eq!(merged, vec![LuggageItem::standard(StandardSize::M, 2)]);
    }

    #[test]
    fn test_merge_overwrites_in_place_and_keeps_untouched() {
        let base = vec![
            LuggageItem::oversized(OversizedKind::Hockey, "Hockey Gear", 1),
            LuggageItem::standard(StandardSize::S, 1),
            LuggageItem::oversized(OversizedKind::Surfboard, "Surfboards", 1),
        ];
        let merged = merge_oversized(&base, &counts(&[(OversizedKind::Hockey, 3)]));
        assert_eq!(merged[0], LuggageItem::oversized(OversizedKind::Hockey, "hockey", 3));
        assert_eq!(merged[1], base[1]);
        assert_eq!(merged[2], base[2]);
    }

    #[test]
    fn test_merge_with_empty_counts_is_noop() {
        let base = vec![
            LuggageItem::standard(StandardSize::XL, 1),
            LuggageItem::oversized(OversizedKind::Sports, "sports", 2),
        ];
        assert_eq!(merge_oversized(&base, &OversizedCounts::new()), base);
    }

    #[test]
    fn test_counts_round_trip() {
        let base = vec![
            LuggageItem::standard(StandardSize::L, 1),
            LuggageItem::oversized(OversizedKind::Bicycles, "bicycles", 2),
            LuggageItem::oversized(OversizedKind::Snowboard, "snowboard", 1),
        ];
        let c = counts_from_luggage(&base);
        assert_eq!(c.len(), 2);
        assert_eq!(merge_oversized(&base, &c), base);
    }

    #[test]
    fn test_counts_sum_duplicates_and_omit_absent() {
        let base = vec![
            LuggageItem::oversized(OversizedKind::Golf, "golf", 1),
            LuggageItem::oversized(OversizedKind::Golf, "golf", 2),
        ];
        let c = counts_from_luggage(&base);
        assert_eq!(c.get(&OversizedKind::Golf), Some(&3));
        assert!(!c.contains_key(&OversizedKind::Ski));

        let merged = merge_oversized(&base, &c);
        assert_eq!(merged, vec![LuggageItem::oversized(OversizedKind::Golf, "golf", 3)]);
    }

    #[test]
    fn test_summary_follows_list_order() {
        let items = vec![
            LuggageItem::standard(StandardSize::L, 1),
            LuggageItem::oversized(OversizedKind::Golf, "Golf Bags", 2),
        ];
        assert_eq!(summarize_luggage(&items), "L 1 · Golf Bags 2");
        assert_eq!(summarize_luggage(&[]), "");
    }

    #[test]
    fn test_set_primary_keeps_single_standard_entry() {
        let items = vec![
            LuggageItem::oversized(OversizedKind::Golf, "golf", 1),
            LuggageItem::standard(StandardSize::L, 1),
        ];
        let replaced = set_primary(&items, Some(StandardLuggage::new(StandardSize::CarryOn, 2)));
        assert_eq!(
            replaced,
            vec![
                LuggageItem::standard(StandardSize::CarryOn, 2),
                LuggageItem::oversized(OversizedKind::Golf, "golf", 1),
            ]
        );

        let cleared = set_primary(&replaced, Some(StandardLuggage::new(StandardSize::M, 0)));
        assert!(primary(&cleared).is_none());
        assert_eq!(total_pieces(&cleared), 1);
        assert_eq!(oversized_pieces(&replaced), 1);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"[
            {"size": "Carry-on", "count": 1, "weightKg": 7.0},
            {"size": "Oversized", "subtype": "golf", "title": "Golf Bags", "count": 2}
        ]"#;
        let items: Vec<LuggageItem> = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(items[0].label(), "Carry-on");
        assert_eq!(items[1].subtype(), Some(OversizedKind::Golf));

        let back = serde_json::to_value(&items[1]).unwrap();
        assert_eq!(back["size"], "Oversized");
        assert_eq!(back["subtype"], "golf");
        assert!(back.get("weightKg").is_none());
    }

    #[test]
    fn test_unknown_oversized_kind_rejected() {
        let json = r#"{"size": "Oversized", "subtype": "piano", "count": 1}"#;
        assert!(serde_json::from_str::<LuggageItem>(json).is_err());

        let counts_json = r#"{"golf": 1, "piano": 2}"#;
        assert!(serde_json::from_str::<OversizedCounts>(counts_json).is_err());
    }

    #[test]
    fn test_new_kinds_appended_in_touch_order() {
        let merged = merge_oversized(
            &[LuggageItem::standard(StandardSize::L, 1)],
            &counts(&[(OversizedKind::Music, 1), (OversizedKind::Bicycles, 2)]),
        );
        assert_eq!(summarize_luggage(&merged), "L 1 · music 1 · bicycles 2");

        let from_json: OversizedCounts = serde_json::from_str(r#"{"ski": 1, "golf": 1}"#).unwrap();
        assert_eq!(from_json.keys().copied().collect::<Vec<_>>(), vec![OversizedKind::Ski, OversizedKind::Golf]);
    }

    #[test]
    fn test_piece_totals_saturate() {
        let items = vec![
            LuggageItem::oversized(OversizedKind::Golf, "golf", u32::MAX),
            LuggageItem::oversized(OversizedKind::Ski, "ski", 5),
        ];
        assert_eq!(oversized_pieces(&items), u32::MAX);
        assert_eq!(total_pieces(&items), u32::MAX);
        assert_eq!(counts_from_luggage(&[items[0].clone(), items[0].clone()])[&OversizedKind::Golf], u32::MAX);
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_luggage(&[
            LuggageItem::standard(StandardSize::M, MAX_STANDARD_COUNT),
            LuggageItem::oversized(OversizedKind::Golf, "golf", MAX_OVERSIZED_COUNT),
        ])
        .is_ok());
        assert!(validate_luggage(&[LuggageItem::oversized(OversizedKind::Golf, "golf", 2_000_000)]).is_err());
        assert!(validate_luggage(&[LuggageItem::standard(StandardSize::M, 9)]).is_err());
        assert!(validate_luggage(&[
            LuggageItem::standard(StandardSize::M, 1),
            LuggageItem::standard(StandardSize::L, 1),
        ])
        .is_err());

        assert!(validate_oversized(&counts(&[(OversizedKind::Golf, 0), (OversizedKind::Ski, 8)])).is_ok());
        assert!(validate_oversized(&counts(&[(OversizedKind::Golf, 2_000_000)])).is_err());
    }

    #[test]
    fn test_normalize_drops_zero_counts() {
        let items = vec![
            LuggageItem::standard(StandardSize::L, 0),
            LuggageItem::oversized(OversizedKind::Ski, "ski", 1),
        ];
        assert_eq!(normalize_luggage(&items), vec![LuggageItem::oversized(OversizedKind::Ski, "ski", 1)]);
    }
}
