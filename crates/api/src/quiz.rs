use db::{error, model::CategorySelector, Filter, Question, Store};
use rand::Rng;

/// Outcome of a single quiz turn.
#[derive(Debug, PartialEq, Eq)]
pub enum Draw {
    /// An unseen question, chosen uniformly at random.
    Question(Question),
    /// Every candidate has already been presented.
    Exhausted,
}

/// Resolves the selector against the store. Unknown categories lift the restriction instead of failing.
async fn candidates<S: Store>(store: &S, selector: CategorySelector) -> error::Result<Filter> {
    let Some(id) = selector.category() else {
        return Ok(Filter::all());
    };

    if store.category(id).await?.is_none() {
        log::debug!("quiz requested unknown category {id}; drawing from all questions");
        return Ok(Filter::all());
    }

    Ok(Filter::by_category(id))
}

fn pick(mut remaining: Vec<Question>) -> Draw {
    if remaining.is_empty() {
        return Draw::Exhausted;
    }
    let index = rand::thread_rng().gen_range(0..remaining.len());
    Draw::Question(remaining.swap_remove(index))
}

/// Draws a question that is not in `previous`. The caller is responsible for remembering the result.
pub async fn draw<S: Store>(store: &S, previous: &[i32], selector: CategorySelector) -> error::Result<Draw> {
    let filter = candidates(store, selector).await?.and_excluding(previous.iter().copied());
    let remaining = store.questions(&filter).await?;
    Ok(pick(remaining))
}
