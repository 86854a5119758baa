//! Daily content selection.
//!
//! First fetch of the day draws a bounded random subset of the catalog and
//! persists the chosen ids; every later fetch that day resolves the stored
//! ids in their stored order. The draw itself is seeded from the selection
//! key, so even when the persist write is lost the same day's retries see
//! the same subset.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use learning_core::selection::{pick_daily, selection_size, SelectionKey};
use learning_core::types::{ContentType, GameQuestion, Level, PhrasalVerb, VocabularyWord};
use learning_core::GameKind;

use crate::db::Database;
use crate::error::Result;

/// Today's vocabulary selection for one user, optionally level-filtered.
pub async fn daily_vocabulary(
    db: &Database,
    user_id: Uuid,
    level: Option<Level>,
) -> Result<Vec<VocabularyWord>> {
    let today = Utc::now().date_naive();
    let ids = match stored_ids(db, user_id, today, ContentType::Vocabulary, level, None).await? {
        Some(ids) => ids,
        None => {
            let catalog = db.get_vocabulary(level.map(Level::as_str)).await?;
            let candidates: Vec<Uuid> = catalog.into_iter().map(|w| w.id).collect();
            pick_and_persist(
                db,
                user_id,
                today,
                ContentType::Vocabulary,
                level,
                None,
                selection_size(level),
                candidates,
            )
            .await?
        }
    };

    let rows = db.get_vocabulary_by_ids(&ids).await?;
    let mut words = Vec::with_capacity(rows.len());
    for row in &rows {
        words.push(row.to_api_word()?);
    }
    Ok(in_selection_order(words, &ids, |w| w.id))
}

/// Today's phrasal-verb selection for one user.
pub async fn daily_phrasal_verbs(
    db: &Database,
    user_id: Uuid,
    level: Option<Level>,
) -> Result<Vec<PhrasalVerb>> {
    let today = Utc::now().date_naive();
    let ids = match stored_ids(db, user_id, today, ContentType::PhrasalVerbs, level, None).await? {
        Some(ids) => ids,
        None => {
            let catalog = db.get_phrasal_verbs(level.map(Level::as_str)).await?;
            let candidates: Vec<Uuid> = catalog.into_iter().map(|v| v.id).collect();
            pick_and_persist(
                db,
                user_id,
                today,
                ContentType::PhrasalVerbs,
                level,
                None,
                selection_size(level),
                candidates,
            )
            .await?
        }
    };

    let rows = db.get_phrasal_verbs_by_ids(&ids).await?;
    let mut verbs = Vec::with_capacity(rows.len());
    for row in &rows {
        verbs.push(row.to_api_verb()?);
    }
    Ok(in_selection_order(verbs, &ids, |v| v.id))
}

/// Today's question set for one mini-game.
pub async fn daily_game_questions(
    db: &Database,
    user_id: Uuid,
    game: GameKind,
) -> Result<Vec<GameQuestion>> {
    let today = Utc::now().date_naive();
    let game_type = Some(game.as_str());
    let ids = match stored_ids(db, user_id, today, ContentType::GameQuestions, None, game_type)
        .await?
    {
        Some(ids) => ids,
        None => {
            let catalog = db.get_game_questions(game.as_str()).await?;
            let candidates: Vec<Uuid> = catalog.into_iter().map(|q| q.id).collect();
            pick_and_persist(
                db,
                user_id,
                today,
                ContentType::GameQuestions,
                None,
                game_type,
                game.config().question_count,
                candidates,
            )
            .await?
        }
    };

    let rows = db.get_game_questions_by_ids(&ids).await?;
    let questions: Vec<GameQuestion> = rows.iter().map(|r| r.to_api_question()).collect();
    Ok(in_selection_order(questions, &ids, |q| q.id))
}

/// The already-persisted selection for today, if any.
async fn stored_ids(
    db: &Database,
    user_id: Uuid,
    today: NaiveDate,
    content_type: ContentType,
    level: Option<Level>,
    game_type: Option<&str>,
) -> Result<Option<Vec<Uuid>>> {
    let stored = db
        .get_daily_selection(
            user_id,
            today,
            content_type.as_str(),
            level.map(Level::as_str),
            game_type,
        )
        .await?;
    Ok(stored.map(|s| s.content_ids))
}

/// Draw today's subset and persist it. First writer wins; on a lost write
/// the computed subset is served for this call and the seeded draw keeps a
/// same-day retry on the same ids.
#[allow(clippy::too_many_arguments)]
async fn pick_and_persist(
    db: &Database,
    user_id: Uuid,
    today: NaiveDate,
    content_type: ContentType,
    level: Option<Level>,
    game_type: Option<&str>,
    size: usize,
    candidates: Vec<Uuid>,
) -> Result<Vec<Uuid>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let key = SelectionKey {
        user_id,
        date: today,
        content_type,
        level,
        game_type: game_type.map(str::to_string),
    };
    let picked = pick_daily(&key, &candidates, size);

    match db
        .insert_daily_selection(
            user_id,
            today,
            content_type.as_str(),
            level.map(Level::as_str),
            game_type,
            &picked,
        )
        .await
    {
        Ok(true) => Ok(picked),
        // Another device persisted first; its row is authoritative.
        Ok(false) => {
            let stored =
                stored_ids(db, user_id, today, content_type, level, game_type).await?;
            Ok(stored.unwrap_or(picked))
        }
        Err(err) => {
            tracing::warn!(%user_id, content_type = content_type.as_str(), error = %err,
                "failed to persist daily selection");
            Ok(picked)
        }
    }
}

/// Restore the stored selection order after a by-ids fetch.
fn in_selection_order<T>(mut items: Vec<T>, ids: &[Uuid], id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    let position = |id: Uuid| ids.iter().position(|x| *x == id).unwrap_or(usize::MAX);
    items.sort_by_key(|item| position(id_of(item)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ordering_follows_stored_ids() {
        let ids = vec![Uuid::from_u128(3), Uuid::from_u128(1), Uuid::from_u128(2)];
        let items = vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
        let ordered = in_selection_order(items, &ids, |id| *id);
        assert_eq!(ordered, ids);
    }

    #[test]
    fn unknown_ids_sort_last() {
        let ids = vec![Uuid::from_u128(2)];
        let items = vec![Uuid::from_u128(9), Uuid::from_u128(2)];
        let ordered = in_selection_order(items, &ids, |id| *id);
        assert_eq!(ordered, vec![Uuid::from_u128(2), Uuid::from_u128(9)]);
    }
}
