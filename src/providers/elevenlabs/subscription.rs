use serde::{Deserialize, Deserializer, Serialize};

use super::voices::null_as_default;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    #[serde(deserialize_with = "null_as_default")]
    pub tier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub character_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub character_limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub can_extend_character_limit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allowed_to_extend_character_limit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub next_character_count_reset_unix: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub voice_limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub professional_voice_limit: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub can_extend_voice_limit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_use_instant_voice_cloning: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_use_professional_voice_cloning: bool,
    pub currency: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub next_invoice: Option<NextInvoice>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_open_invoices: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NextInvoice {
    pub amount_due_cents: i64,
    pub next_payment_attempt_unix: i64,
}

/// `/user/subscription` is typed as a list but the endpoint answers with a
/// single object, so accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Subscription>),
    One(Box<Subscription>),
}

pub(crate) fn deserialize_subscriptions<'de, D>(
    deserializer: D,
) -> Result<Vec<Subscription>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(subscriptions) => subscriptions,
        OneOrMany::One(subscription) => vec![*subscription],
    })
}

#[derive(Deserialize)]
pub(crate) struct Subscriptions(
    #[serde(deserialize_with = "deserialize_subscriptions")] pub Vec<Subscription>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subscription_json() -> serde_json::Value {
        json!({
            "tier": "creator",
            "character_count": 1200,
            "character_limit": 100000,
            "can_extend_character_limit": true,
            "allowed_to_extend_character_limit": true,
            "next_character_count_reset_unix": 1718000000,
            "voice_limit": 30,
            "professional_voice_limit": 1,
            "can_extend_voice_limit": false,
            "can_use_instant_voice_cloning": true,
            "can_use_professional_voice_cloning": true,
            "currency": "usd",
            "status": "active",
            "next_invoice": { "amount_due_cents": 2200, "next_payment_attempt_unix": 1718000000 },
            "has_open_invoices": false
        })
    }

    #[test]
    fn single_object_decodes_as_list() {
        let Subscriptions(subs) = serde_json::from_value(subscription_json()).unwrap();

        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].tier, "creator");
        assert_eq!(subs[0].next_invoice.as_ref().unwrap().amount_due_cents, 2200);
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let mut body = subscription_json();
        body["tier"] = json!(null);
        body["character_count"] = json!(null);
        body["can_use_instant_voice_cloning"] = json!(null);

        let Subscriptions(subs) = serde_json::from_value(body).unwrap();

        assert_eq!(subs[0].tier, "");
        assert_eq!(subs[0].character_count, 0);
        assert!(!subs[0].can_use_instant_voice_cloning);
        assert_eq!(subs[0].character_limit, 100000);
    }

    #[test]
    fn list_decodes_as_list() {
        let body = json!([subscription_json(), subscription_json()]);
        let Subscriptions(subs) = serde_json::from_value(body).unwrap();

        assert_eq!(subs.len(), 2);
    }
}
