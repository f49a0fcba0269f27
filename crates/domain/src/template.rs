use crate::shared::entity::{Entity, ID};
use crate::tracker::{ReminderStage, ReminderTracker};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALUTATION: &str = "there";
pub const DEFAULT_PRODUCT_PHRASE: &str = "your recent purchase";
pub const DEFAULT_REVIEW_LINK: &str = "https://www.amazon.com/review/review-your-purchases";
pub const DEFAULT_PRODUCT_LINK: &str = "https://www.amazon.com";

/// An operator-edited override of the packaged reminder email for one stage.
/// At most one override exists per stage; deleting it reverts that stage to
/// the packaged default.
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub id: ID,
    pub stage: ReminderStage,
    pub subject: String,
    pub body: String,
    pub is_active: bool,
    pub created: i64,
    pub updated: i64,
}

impl Entity for EmailTemplate {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Per-order substitution values for the `{{customerName}}`,
/// `{{productName}}`, `{{reviewLink}}` and `{{productLink}}` placeholders.
/// Missing values fall back to generic phrases so the send path always has
/// some content.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub review_link: Option<String>,
    pub product_link: Option<String>,
}

impl TemplateValues {
    pub fn for_tracker(tracker: &ReminderTracker) -> Self {
        Self {
            customer_name: Some(tracker.customer.name.clone()),
            product_name: tracker.product.name.clone(),
            review_link: tracker.product.review_link.clone(),
            product_link: tracker.product.link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Replaces every occurrence of each placeholder in subject and body with
/// the supplied value or its generic fallback
pub fn render_template(subject: &str, body: &str, values: &TemplateValues) -> RenderedEmail {
    let substitute = |text: &str| {
        text.replace(
            "{{customerName}}",
            values.customer_name.as_deref().unwrap_or(DEFAULT_SALUTATION),
        )
        .replace(
            "{{productName}}",
            values
                .product_name
                .as_deref()
                .unwrap_or(DEFAULT_PRODUCT_PHRASE),
        )
        .replace(
            "{{reviewLink}}",
            values.review_link.as_deref().unwrap_or(DEFAULT_REVIEW_LINK),
        )
        .replace(
            "{{productLink}}",
            values
                .product_link
                .as_deref()
                .unwrap_or(DEFAULT_PRODUCT_LINK),
        )
    };

    RenderedEmail {
        subject: substitute(subject),
        body: substitute(body),
    }
}

/// The packaged default `(subject, body)` for a stage, used whenever no
/// active override exists
pub fn default_template(stage: ReminderStage) -> (&'static str, &'static str) {
    match stage {
        ReminderStage::Day3 => (
            "Hi {{customerName}}, how is {{productName}} working out?",
            r#"<p>Hi {{customerName}},</p>
<p>Thanks again for your order! You have had a few days with {{productName}} now,
and we would love to hear how it is going.</p>
<p>If you have a minute, sharing your experience helps other customers a lot:</p>
<p><a href="{{reviewLink}}">Write a quick review</a></p>
<p>Happy to help if anything is not right, just reply to this email.</p>
<p>Thank you!</p>"#,
        ),
        ReminderStage::Day7 => (
            "{{customerName}}, your opinion on {{productName}} matters",
            r#"<p>Hi {{customerName}},</p>
<p>It has been about a week since you received {{productName}}.
We hope it is treating you well!</p>
<p>Would you take a moment to leave a review? It only takes a minute
and means the world to a small team like ours:</p>
<p><a href="{{reviewLink}}">Leave your review</a></p>
<p>You can revisit the product page <a href="{{productLink}}">here</a>.</p>
<p>Thanks so much!</p>"#,
        ),
        ReminderStage::Day14 => (
            "Two weeks with {{productName}} - tell us what you think",
            r#"<p>Hi {{customerName}},</p>
<p>You have had {{productName}} for a couple of weeks now, long enough to
really know it. Honest reviews from customers like you are what other
shoppers trust the most.</p>
<p><a href="{{reviewLink}}">Share your experience</a></p>
<p>If anything is wrong with your order, reply to this email first and we
will make it right.</p>
<p>Thank you for your time!</p>"#,
        ),
        ReminderStage::Day30 => (
            "A last note about {{productName}}, {{customerName}}",
            r#"<p>Hi {{customerName}},</p>
<p>This is our last reminder, we promise! It has been a month since your
order, and if {{productName}} has earned a place in your routine we would
be grateful for a review:</p>
<p><a href="{{reviewLink}}">Write a review</a></p>
<p>Either way, thank you for being our customer.</p>
<p>All the best!</p>"#,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_supplied_values_everywhere() {
        let values = TemplateValues {
            customer_name: Some("Ana".into()),
            product_name: Some("Steel Tongs".into()),
            review_link: Some("https://example.test/review".into()),
            product_link: None,
        };
        let rendered = render_template(
            "Hi {{customerName}} and again {{customerName}}",
            "Buy {{productName}} at {{productLink}}, review at {{reviewLink}}",
            &values,
        );
        assert_eq!(rendered.subject, "Hi Ana and again Ana");
        assert_eq!(
            rendered.body,
            format!(
                "Buy Steel Tongs at {}, review at https://example.test/review",
                DEFAULT_PRODUCT_LINK
            )
        );
    }

    #[test]
    fn missing_values_fall_back_to_generic_phrases() {
        let rendered = render_template(
            "{{customerName}}",
            "{{productName}} / {{reviewLink}}",
            &TemplateValues::default(),
        );
        assert_eq!(rendered.subject, DEFAULT_SALUTATION);
        assert_eq!(
            rendered.body,
            format!("{} / {}", DEFAULT_PRODUCT_PHRASE, DEFAULT_REVIEW_LINK)
        );
    }

    #[test]
    fn every_stage_has_a_packaged_default_with_a_review_link() {
        for stage in ReminderStage::ALL {
            let (subject, body) = default_template(stage);
            assert!(!subject.is_empty());
            assert!(body.contains("{{reviewLink}}"));
        }
    }
}
