use super::ITemplateRepo;
use crate::repos::shared::mongo_repo;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use nurture_scheduler_domain::{EmailTemplate, ReminderStage, ID};
use serde::{Deserialize, Serialize};

pub struct MongoTemplateRepo {
    collection: Collection<Document>,
}

impl MongoTemplateRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("email-templates"),
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for MongoTemplateRepo {
    async fn insert(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        mongo_repo::insert::<_, TemplateMongo>(&self.collection, template).await
    }

    async fn save(&self, template: &EmailTemplate) -> anyhow::Result<()> {
        mongo_repo::save::<_, TemplateMongo>(&self.collection, template).await
    }

    async fn find(&self, template_id: &ID) -> Option<EmailTemplate> {
        mongo_repo::find::<_, TemplateMongo>(&self.collection, template_id.inner_ref()).await
    }

    async fn find_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate> {
        let filter = doc! {
            "stage": stage.day() as i32
        };
        mongo_repo::find_one_by::<_, TemplateMongo>(&self.collection, filter).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmailTemplate>> {
        mongo_repo::find_many_by::<_, TemplateMongo>(&self.collection, doc! {}).await
    }

    async fn delete_by_stage(&self, stage: ReminderStage) -> Option<EmailTemplate> {
        let filter = doc! {
            "stage": stage.day() as i32
        };
        mongo_repo::delete_one_by::<_, TemplateMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TemplateMongo {
    _id: ObjectId,
    stage: ReminderStage,
    subject: String,
    body: String,
    is_active: bool,
    created: i64,
    updated: i64,
}

impl MongoDocument<EmailTemplate> for TemplateMongo {
    fn to_domain(self) -> EmailTemplate {
        EmailTemplate {
            id: ID::from(self._id),
            stage: self.stage,
            subject: self.subject,
            body: self.body,
            is_active: self.is_active,
            created: self.created,
            updated: self.updated,
        }
    }

    fn from_domain(template: &EmailTemplate) -> Self {
        Self {
            _id: *template.id.inner_ref(),
            stage: template.stage,
            subject: template.subject.clone(),
            body: template.body.clone(),
            is_active: template.is_active,
            created: template.created,
            updated: template.updated,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}
