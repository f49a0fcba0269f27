use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, to_document, Document},
    options::FindOptions,
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Mapping between a domain entity and its persisted document
pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

fn get_id_filter(oid: &ObjectId) -> Document {
    doc! {
        "_id": oid
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    to_document(&raw).map_err(anyhow::Error::new)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = to_document(&raw)?;
    collection.replace_one(filter, doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    find_one_by::<E, D>(collection, filter).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => match persistence_to_entity::<E, D>(doc) {
            Ok(e) => Some(e),
            Err(err) => {
                error!("Unable to deserialize mongo document: {:?}", err);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            error!("Mongo find one query failed: {:?}", err);
            None
        }
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, None).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn find_with_options<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    find_options: FindOptions,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, find_options).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

pub async fn delete<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ObjectId,
) -> Option<E> {
    let filter = get_id_filter(id);
    delete_one_by::<E, D>(collection, filter).await
}

pub async fn delete_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one_and_delete(filter, None).await {
        Ok(Some(doc)) => persistence_to_entity::<E, D>(doc).ok(),
        Ok(None) => None,
        Err(err) => {
            error!("Mongo delete query failed: {:?}", err);
            None
        }
    }
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result {
            Ok(document) => match persistence_to_entity::<E, D>(document) {
                Ok(e) => documents.push(e),
                Err(e) => {
                    error!("Unable to deserialize mongo document: {:?}", e);
                }
            },
            Err(e) => {
                error!("Error advancing mongo cursor: {:?}", e);
            }
        }
    }

    documents
}
