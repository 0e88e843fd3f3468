use crate::{
    error::{Error, Result},
    page::{paginate, QUESTIONS_PER_PAGE},
};
use db::{
    model::{NewQuestion, Search},
    Filter, Store,
};
use serde_json::{json, Value};

pub async fn list<S: Store>(store: &S, page: usize) -> Result<Value> {
    let questions = store.questions(&Filter::all()).await?;
    let current = paginate(&questions, page, QUESTIONS_PER_PAGE);
    if current.is_empty() {
        return Err(Error::NotFound);
    }

    let categories = super::category::to_map(store.categories().await?);
    Ok(json!({
        "success": true,
        "questions": current,
        "total_questions": questions.len(),
        "categories": categories,
        "current_category": null,
    }))
}

/// An unknown category is a missing resource. A known but empty category is a valid, empty listing.
pub async fn list_by_category<S: Store>(store: &S, category: i32, page: usize) -> Result<Value> {
    if store.category(category).await?.is_none() {
        return Err(Error::NotFound);
    }

    let questions = store.questions(&Filter::by_category(category)).await?;
    let current = paginate(&questions, page, QUESTIONS_PER_PAGE);
    if current.is_empty() && !questions.is_empty() {
        return Err(Error::NotFound);
    }

    Ok(json!({
        "success": true,
        "questions": current,
        "total_questions": questions.len(),
        "current_category": category,
    }))
}

pub async fn search<S: Store>(store: &S, search: &Search, page: usize) -> Result<Value> {
    let filter = search.term().and_then(Filter::by_search_term).ok_or(Error::NotFound)?;
    let questions = store.questions(&filter).await?;
    if questions.is_empty() {
        return Err(Error::NotFound);
    }

    Ok(json!({
        "success": true,
        "questions": paginate(&questions, page, QUESTIONS_PER_PAGE),
        "total_questions": questions.len(),
    }))
}

pub async fn create<S: Store>(store: &S, question: &NewQuestion) -> Result<Value> {
    if question.texts().is_none() {
        return Err(Error::Unprocessable);
    }
    let id = store.insert_question(question).await?;
    log::info!("created question {id}");
    Ok(json!({ "success": true, "created": id }))
}

/// Every failure (including a missing ID) is reported as unprocessable.
pub async fn delete<S: Store>(store: &S, id: i32) -> Result<Value> {
    store.delete_question(id).await.map_err(|err| {
        log::warn!("cannot delete question {id}: {err}");
        Error::Unprocessable
    })?;
    log::info!("deleted question {id}");
    Ok(json!({ "success": true, "deleted": id }))
}
