use alloc::{string::String, vec::Vec};
use core::fmt::{self, Formatter};
use serde::{
    de::{Error, IgnoredAny, MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer,
};

/// Which questions a quiz may draw from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategorySelector {
    /// No category restriction.
    #[default]
    All,
    /// Only questions of the given category.
    Category(i32),
}

impl CategorySelector {
    pub const fn category(self) -> Option<i32> {
        if let Self::Category(id) = self {
            Some(id)
        } else {
            None
        }
    }
}

impl From<i64> for CategorySelector {
    fn from(id: i64) -> Self {
        match i32::try_from(id) {
            Ok(0) | Err(_) => Self::All,
            Ok(id) => Self::Category(id),
        }
    }
}

struct SelectorVisitor;

impl<'de> Visitor<'de> for SelectorVisitor {
    type Value = CategorySelector;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a category ID or the `all` sentinel")
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.into())
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(value).map_or(CategorySelector::All, CategorySelector::from))
    }

    fn visit_f64<E: Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(CategorySelector::All)
    }

    /// Anything that does not read as an integer (`"all"`, `"click"`, ...) lifts the restriction.
    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.trim().parse::<i64>().map_or(CategorySelector::All, CategorySelector::from))
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(CategorySelector::All)
    }

    fn visit_bool<E: Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(CategorySelector::All)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(CategorySelector::All)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(CategorySelector::All)
    }
}

impl<'de> Deserialize<'de> for CategorySelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SelectorVisitor)
    }
}

/// The category descriptor sent along with every quiz turn.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: CategorySelector,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Body of a single quiz turn. Both fields are mandatory.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizTurn {
    /// IDs of every question already presented during this quiz.
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategory,
}
