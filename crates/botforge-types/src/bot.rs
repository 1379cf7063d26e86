use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a bot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotId(pub Uuid);

impl BotId {
    /// Create a new time-sortable BotId.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A chatbot configuration record.
///
/// Owned by the external record store; the chat pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: BotId,
    /// Display name used in the synthesized system prompt.
    pub name: String,
    /// Short description; falls back to a generic assistant phrase when absent.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text system prompt override.
    #[serde(default)]
    pub training_data: Option<String>,
    /// Capability template chosen when the bot was built.
    #[serde(default)]
    pub template: BotTemplate,
    /// Key/value reference facts the bot may quote.
    #[serde(default)]
    pub knowledge_base: KnowledgeBase,
}

impl Bot {
    /// Description with surrounding whitespace removed, or `None` if blank.
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Training text with surrounding whitespace removed, or `None` if blank.
    pub fn training_text(&self) -> Option<&str> {
        non_blank(self.training_data.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Named capability sets a bot can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BotTemplate {
    CustomerSupport,
    Sales,
    LeadGeneration,
    Faq,
    AppointmentBooking,
    #[default]
    General,
}

impl BotTemplate {
    /// Human-readable role title.
    pub fn title(&self) -> &'static str {
        match self {
            BotTemplate::CustomerSupport => "Customer Support Agent",
            BotTemplate::Sales => "Sales Assistant",
            BotTemplate::LeadGeneration => "Lead Generation Assistant",
            BotTemplate::Faq => "FAQ Assistant",
            BotTemplate::AppointmentBooking => "Appointment Booking Assistant",
            BotTemplate::General => "General Assistant",
        }
    }

    /// What a bot built from this template is expected to help with, in order.
    pub fn capabilities(&self) -> &'static [&'static str] {
        match self {
            BotTemplate::CustomerSupport => &[
                "Answer questions about products and services",
                "Troubleshoot common issues step by step",
                "Explain policies such as returns, refunds, and shipping",
                "Escalate to a human agent when a problem cannot be solved",
            ],
            BotTemplate::Sales => &[
                "Recommend products that match the customer's needs",
                "Explain pricing, plans, and current offers",
                "Handle objections honestly",
                "Guide the customer towards a purchase",
            ],
            BotTemplate::LeadGeneration => &[
                "Qualify visitors with short, relevant questions",
                "Collect name, email, and company details politely",
                "Summarize how the business can help",
                "Offer to schedule a follow-up",
            ],
            BotTemplate::Faq => &[
                "Answer frequently asked questions accurately",
                "Point to the relevant resource or page",
                "Say so clearly when an answer is not known",
            ],
            BotTemplate::AppointmentBooking => &[
                "Help visitors choose a suitable time slot",
                "Collect the details needed for a booking",
                "Explain rescheduling and cancellation options",
                "Confirm booking details back to the visitor",
            ],
            BotTemplate::General => &[
                "Answer questions clearly and accurately",
                "Help users accomplish their tasks",
                "Ask clarifying questions when a request is ambiguous",
            ],
        }
    }
}

impl fmt::Display for BotTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotTemplate::CustomerSupport => write!(f, "customer-support"),
            BotTemplate::Sales => write!(f, "sales"),
            BotTemplate::LeadGeneration => write!(f, "lead-generation"),
            BotTemplate::Faq => write!(f, "faq"),
            BotTemplate::AppointmentBooking => write!(f, "appointment-booking"),
            BotTemplate::General => write!(f, "general"),
        }
    }
}

impl FromStr for BotTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "customer-support" | "support" => Ok(BotTemplate::CustomerSupport),
            "sales" => Ok(BotTemplate::Sales),
            "lead-generation" | "leads" => Ok(BotTemplate::LeadGeneration),
            "faq" => Ok(BotTemplate::Faq),
            "appointment-booking" | "booking" => Ok(BotTemplate::AppointmentBooking),
            "general" => Ok(BotTemplate::General),
            other => Err(format!("invalid bot template: '{other}'")),
        }
    }
}

impl BotTemplate {
    /// Lenient parse used for stored records: unknown or missing names become `General`.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

/// Ordered key/value reference entries attached to a bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub entries: Vec<(String, String)>,
}

impl KnowledgeBase {
    /// Build from the stored JSON value.
    ///
    /// Only a JSON object is meaningful; string values are kept as-is and
    /// any other value is rendered as compact JSON. Anything else yields an
    /// empty knowledge base.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let entries = map
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::Null => return None,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), text))
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
