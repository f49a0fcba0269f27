use nurture_scheduler_domain::{
    default_template, render_template, ReminderStage, ReminderTracker, RenderedEmail,
    TemplateValues,
};
use nurture_scheduler_infra::NurtureContext;

/// Resolves the email content for one stage of one tracker. An active
/// stored override wins over the packaged default; an inactive override is
/// ignored. Placeholders are substituted with the tracker's order values or
/// their generic fallbacks, so this always produces sendable content.
pub async fn resolve_template(
    ctx: &NurtureContext,
    stage: ReminderStage,
    tracker: &ReminderTracker,
) -> RenderedEmail {
    let (subject, body) = match ctx.repos.templates.find_by_stage(stage).await {
        Some(template) if template.is_active => (template.subject, template.body),
        _ => {
            let (subject, body) = default_template(stage);
            (subject.to_string(), body.to_string())
        }
    };

    let values = TemplateValues::for_tracker(tracker);
    render_template(&subject, &body, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurture_scheduler_domain::{
        CustomerContact, EmailTemplate, ProductContext, DEFAULT_REVIEW_LINK,
    };

    fn tracker() -> ReminderTracker {
        ReminderTracker::new(
            "111-2222222-3333333".into(),
            CustomerContact {
                email: "ana@nurture.test".into(),
                name: "Ana".into(),
                phone: None,
            },
            ProductContext::default(),
            0,
        )
    }

    #[actix_web::main]
    #[test]
    async fn falls_back_to_packaged_default_with_generic_values() {
        let ctx = NurtureContext::create_inmemory();
        let tracker = tracker();

        let rendered = resolve_template(&ctx, ReminderStage::Day7, &tracker).await;

        // Customer name is known, product values fall back
        assert!(rendered.body.contains("Ana"));
        assert!(rendered.body.contains(DEFAULT_REVIEW_LINK));
        assert!(!rendered.body.contains("{{"));
        assert!(!rendered.subject.contains("{{"));
    }

    #[actix_web::main]
    #[test]
    async fn active_override_wins_over_default() {
        let ctx = NurtureContext::create_inmemory();
        let template = EmailTemplate {
            id: Default::default(),
            stage: ReminderStage::Day3,
            subject: "Hello {{customerName}}".into(),
            body: "Visit {{reviewLink}}".into(),
            is_active: true,
            created: 0,
            updated: 0,
        };
        ctx.repos.templates.insert(&template).await.unwrap();

        let rendered = resolve_template(&ctx, ReminderStage::Day3, &tracker()).await;
        assert_eq!(rendered.subject, "Hello Ana");
        assert_eq!(rendered.body, format!("Visit {}", DEFAULT_REVIEW_LINK));
    }

    #[actix_web::main]
    #[test]
    async fn inactive_override_is_ignored() {
        let ctx = NurtureContext::create_inmemory();
        let template = EmailTemplate {
            id: Default::default(),
            stage: ReminderStage::Day3,
            subject: "Disabled override".into(),
            body: "Disabled override".into(),
            is_active: false,
            created: 0,
            updated: 0,
        };
        ctx.repos.templates.insert(&template).await.unwrap();

        let rendered = resolve_template(&ctx, ReminderStage::Day3, &tracker()).await;
        assert_ne!(rendered.subject, "Disabled override");
    }
}
