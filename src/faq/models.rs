use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a stored FAQ.
///
/// The persistent backend hands out UUID keys, the in-memory backend a
/// sequence number. Both serialize as their bare JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaqId {
    Seq(u64),
    Key(String),
}

impl fmt::Display for FaqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaqId::Seq(n) => write!(f, "{n}"),
            FaqId::Key(k) => f.write_str(k),
        }
    }
}

/// A stored FAQ entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub img_name: Option<String>,
    #[serde(default)]
    pub related_services: Vec<String>,
    pub category: String,
    pub updated_date: DateTime<Utc>,
}

impl Faq {
    pub fn new(
        id: FaqId,
        valid: ValidFaq,
        img_name: Option<String>,
        updated_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question: valid.question,
            answer: valid.answer,
            img_name,
            related_services: valid.related_services,
            category: valid.category,
            updated_date,
        }
    }

    /// Replace every field except `id`. The image is only overwritten when a
    /// new one was uploaded, and `updated_date` never moves backwards.
    pub fn apply(&mut self, valid: ValidFaq, img_name: Option<String>, now: DateTime<Utc>) {
        self.question = valid.question;
        self.answer = valid.answer;
        self.related_services = valid.related_services;
        self.category = valid.category;
        if img_name.is_some() {
            self.img_name = img_name;
        }
        self.updated_date = now.max(self.updated_date);
    }
}

/// Client-supplied `related_services`: a single value or a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RelatedServices {
    One(String),
    Many(Vec<String>),
}

impl RelatedServices {
    /// Append another occurrence of the field, keeping arrival order.
    pub fn push(self, value: String) -> Self {
        match self {
            RelatedServices::One(first) => RelatedServices::Many(vec![first, value]),
            RelatedServices::Many(mut values) => {
                values.push(value);
                RelatedServices::Many(values)
            }
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            RelatedServices::One(value) if value.is_empty() => Vec::new(),
            RelatedServices::One(value) => vec![value],
            RelatedServices::Many(values) => values,
        }
    }
}

/// Request body for create and update, before validation.
///
/// Every field is optional here so that missing values are reported by the
/// validator with its own messages rather than by the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaqPayload {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub related_services: Option<RelatedServices>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub img_name: Option<String>,
    #[serde(default)]
    pub updated_date: Option<String>,
    /// Keys outside the schema; any entry here fails validation.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

/// A payload that passed validation, with `related_services` normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFaq {
    pub question: String,
    pub answer: String,
    pub related_services: Vec<String>,
    pub category: String,
    pub updated_date: Option<DateTime<Utc>>,
}
