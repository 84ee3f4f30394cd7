//! Folds flat relational rows into hierarchical item records.
//!
//! One item spans several rows (year x body of knowledge x question cross
//! product). One-to-one fields come from the first row, including the JSON
//! payload decodes, which happen exactly once per distinct item and whose
//! failures propagate. One-to-many fields accumulate with deduplication.

use std::collections::{
	HashMap, HashSet,
	hash_map::Entry,
};

use itemdex_domain::{BodyOfKnowledge, Content, ItemContent, ResourceLink, definition};
use itemdex_storage::models::ItemRow;

use crate::Result;

struct Fold {
	content: Content,
	seen_body_of_knowledge_ids: HashSet<String>,
}

/// Groups rows by item id, preserving first-appearance order.
pub fn fold_rows(rows: Vec<ItemRow>) -> Result<Vec<Content>> {
	let mut order: Vec<String> = Vec::new();
	let mut folds: HashMap<String, Fold> = HashMap::new();

	for row in rows {
		let fold = match folds.entry(row.id.clone()) {
			Entry::Vacant(slot) => {
				order.push(row.id.clone());

				slot.insert(Fold {
					content: content_from_row(&row)?,
					seen_body_of_knowledge_ids: HashSet::new(),
				})
			},
			Entry::Occupied(slot) => slot.into_mut(),
		};

		accumulate(fold, &row);
	}

	Ok(order.into_iter().filter_map(|id| folds.remove(&id)).map(|fold| fold.content).collect())
}

fn content_from_row(row: &ItemRow) -> Result<Content> {
	let content: ItemContent = match row.content.as_deref() {
		Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
		_ => ItemContent::default(),
	};
	let metadata: HashMap<String, String> = match row.metadata.as_deref() {
		Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
		_ => HashMap::new(),
	};
	let resource_links: Vec<ResourceLink> = match row.resource_links.as_deref() {
		Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
		_ => Vec::new(),
	};
	let subject_ids = row
		.subject_ids
		.as_deref()
		.unwrap_or("")
		.split(',')
		.filter(|part| !part.is_empty())
		.map(str::to_string)
		.collect();
	let question_count = content.question_count.unwrap_or(content.questions.len() as i32);

	Ok(Content {
		id: row.id.clone(),
		fidelity: row.fidelity.clone(),
		difficulty: row.difficulty.clone(),
		applicable_years: Vec::new(),
		subject_ids,
		solution: row.solution.clone(),
		is_set: question_count > 1,
		is_online_ready: row.online_readiness.as_deref()
			== Some(definition::ONLINE_READINESS_READY),
		online_readiness: row.online_readiness.clone(),
		metadata,
		resource_links,
		created_on: row.created_on.clone(),
		updated_on: row.updated_on.clone(),
		body_of_knowledges: Vec::new(),
		content,
	})
}

fn accumulate(fold: &mut Fold, row: &ItemRow) {
	if let Some(year) = row.applicable_year
		&& !fold.content.applicable_years.contains(&year)
	{
		fold.content.applicable_years.push(year);
	}

	// Bodies of knowledge dedup by their own id, which never leaves the fold.
	if let Some(id) = row.body_of_knowledge_id.as_ref()
		&& fold.seen_body_of_knowledge_ids.insert(id.clone())
	{
		fold.content.body_of_knowledges.push(BodyOfKnowledge {
			subject_id: row.body_of_knowledge_subject_id.clone(),
			initiation_year: row.body_of_knowledge_initiation_year,
			final_year: row.body_of_knowledge_final_year,
			code: row.body_of_knowledge_code.clone(),
			name: row.body_of_knowledge_name.clone(),
		});
	}

	// Answering methods are positional by question index, never re-decoded
	// from the JSON payload. Out-of-range indices are dropped.
	if let Some(index) = row.question_index
		&& index >= 0
		&& let Some(method) = row.answering_method.as_ref()
		&& let Some(question) = fold.content.content.questions.get_mut(index as usize)
	{
		question.answering_method = Some(method.clone());
	}
}
