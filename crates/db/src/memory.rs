use crate::{error, Filter, Store};
use alloc::{collections::BTreeMap, string::ToString, vec::Vec};
use model::{Category, NewQuestion, Question};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    /// Next ID to be assigned. IDs are never reused, even after deletion.
    next: i32,
}

/// A volatile [`Store`] backed by ordered maps.
#[derive(Default)]
pub struct Memory(RwLock<Tables>);

impl Memory {
    pub fn new<C, Q>(categories: C, questions: Q) -> Self
    where
        C: IntoIterator<Item = Category>,
        Q: IntoIterator<Item = Question>,
    {
        let categories: BTreeMap<_, _> = categories.into_iter().map(|category| (category.id, category)).collect();
        let questions: BTreeMap<_, _> = questions.into_iter().map(|question| (question.id, question)).collect();
        let next = questions.last_key_value().map_or(1, |(&id, _)| id.saturating_add(1));
        Self(RwLock::new(Tables { categories, questions, next }))
    }
}

impl Store for Memory {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        Ok(self.0.read().await.categories.values().cloned().collect())
    }

    async fn category(&self, id: i32) -> error::Result<Option<Category>> {
        Ok(self.0.read().await.categories.get(&id).cloned())
    }

    async fn questions(&self, filter: &Filter) -> error::Result<Vec<Question>> {
        let tables = self.0.read().await;
        Ok(tables.questions.values().filter(|question| filter.matches(question)).cloned().collect())
    }

    async fn insert_question(&self, question: &NewQuestion) -> error::Result<i32> {
        let (text, answer) = question.texts().ok_or(error::Error::BadInput)?;
        let mut tables = self.0.write().await;
        let id = tables.next.max(1);
        tables.next = id.checked_add(1).ok_or(error::Error::Fatal)?;
        let record = Question {
            id,
            question: text.to_string(),
            answer: answer.to_string(),
            category: question.category,
            difficulty: question.difficulty,
        };
        assert!(tables.questions.insert(id, record).is_none());
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> error::Result<()> {
        self.0.write().await.questions.remove(&id).map(drop).ok_or(error::Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::Memory;
    use crate::{error::Error, Filter, Store};
    use model::{Category, NewQuestion, Question};

    fn fixture() -> Memory {
        let categories = [
            Category { id: 1, kind: "Science".into() },
            Category { id: 2, kind: "Art".into() },
        ];
        let questions = [(5, 1, "Who discovered gravity?"), (6, 1, "What is H2O?"), (7, 2, "Who painted Guernica?")]
            .map(|(id, category, text)| Question {
                id,
                question: text.into(),
                answer: "answer".into(),
                category: Some(category),
                difficulty: Some(1),
            });
        Memory::new(categories, questions)
    }

    fn ids(questions: &[Question]) -> Vec<i32> {
        questions.iter().map(|question| question.id).collect()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn lists_by_category_in_id_order() {
        let store = fixture();
        assert_eq!(ids(&store.questions(&Filter::by_category(1)).await.unwrap()), [5, 6]);
        assert_eq!(ids(&store.questions(&Filter::by_category(2)).await.unwrap()), [7]);
        assert!(store.questions(&Filter::by_category(42)).await.unwrap().is_empty());
        assert_eq!(ids(&store.questions(&Filter::all()).await.unwrap()), [5, 6, 7]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn searches_ignoring_case() {
        let store = fixture();
        let found = store.questions(&Filter::by_search_term("WHO").unwrap()).await.unwrap();
        assert_eq!(ids(&found), [5, 7]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn looks_up_categories() {
        let store = fixture();
        let categories = store.categories().await.unwrap();
        assert_eq!(categories.iter().map(|category| category.id).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(store.category(2).await.unwrap().unwrap().kind, "Art");
        assert!(store.category(3).await.unwrap().is_none());
        assert!(Memory::default().categories().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn insert_then_delete_hides_question() {
        let store = fixture();
        let new = NewQuestion {
            question: Some("Who wrote Hamlet?".into()),
            answer: Some("Shakespeare".into()),
            category: Some(2),
            difficulty: None,
        };
        let id = store.insert_question(&new).await.unwrap();
        assert_eq!(id, 8);
        assert_eq!(ids(&store.questions(&Filter::by_category(2)).await.unwrap()), [7, 8]);

        store.delete_question(id).await.unwrap();
        assert_eq!(store.delete_question(id).await.unwrap_err(), Error::NotFound);
        assert_eq!(ids(&store.questions(&Filter::by_category(2)).await.unwrap()), [7]);
        let found = store.questions(&Filter::by_search_term("hamlet").unwrap()).await.unwrap();
        assert!(found.is_empty());

        // IDs are not recycled
        assert_eq!(store.insert_question(&new).await.unwrap(), 9);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejects_missing_text() {
        let store = Memory::default();
        let blank = NewQuestion { question: Some(String::new()), answer: Some("x".into()), ..Default::default() };
        assert_eq!(store.insert_question(&blank).await.unwrap_err(), Error::BadInput);
        let missing = NewQuestion { question: Some("When was Galileo born?".into()), ..Default::default() };
        assert_eq!(store.insert_question(&missing).await.unwrap_err(), Error::BadInput);
        assert_eq!(store.insert_question(&NewQuestion { answer: Some("y".into()), ..missing }).await.unwrap(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn deleting_unknown_question_fails() {
        assert_eq!(fixture().delete_question(999).await.unwrap_err(), Error::NotFound);
    }
}
