use sqlx::PgPool;

use crate::{Result, models::ItemRow};

// One row per (item, year, body of knowledge, question) combination. The
// fold relies on rows for an item being contiguous and questions arriving in
// index order.
const FETCH_BY_IDS_SQL: &str = "\
SELECT
	items.id,
	items.fidelity,
	items.difficulty,
	items.content,
	items.metadata,
	items.resource_links,
	items.solution,
	items.subject_ids,
	items.online_readiness,
	items.created_on::text AS created_on,
	items.updated_on::text AS updated_on,
	item_years.year AS applicable_year,
	bodies_of_knowledge.id AS body_of_knowledge_id,
	bodies_of_knowledge.subject_id AS body_of_knowledge_subject_id,
	bodies_of_knowledge.initiation_year AS body_of_knowledge_initiation_year,
	bodies_of_knowledge.final_year AS body_of_knowledge_final_year,
	bodies_of_knowledge.code AS body_of_knowledge_code,
	bodies_of_knowledge.name AS body_of_knowledge_name,
	questions.question_index,
	questions.answering_method
FROM items
LEFT JOIN item_years ON item_years.item_id = items.id
LEFT JOIN bodies_of_knowledge ON bodies_of_knowledge.item_id = items.id
LEFT JOIN questions ON questions.item_id = items.id
WHERE items.id = ANY($1)
ORDER BY items.id, questions.question_index";

/// Flat rows for the given item ids. Failures propagate; the relational
/// store is never soft-failed.
pub async fn fetch_by_ids(pool: &PgPool, ids: &[String]) -> Result<Vec<ItemRow>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, ItemRow>(FETCH_BY_IDS_SQL).bind(ids).fetch_all(pool).await?;

	Ok(rows)
}
