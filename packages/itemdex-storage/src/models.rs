/// One denormalized join row. An item spans several rows: the cross product
/// of its applicable years, bodies of knowledge, and questions. JSON-bearing
/// columns (`content`, `metadata`, `resource_links`) come back as raw text
/// and are decoded exactly once per distinct item during the fold.
#[derive(Clone, Debug, Default, sqlx::FromRow)]
pub struct ItemRow {
	pub id: String,
	pub fidelity: Option<String>,
	pub difficulty: Option<String>,
	pub content: Option<String>,
	pub metadata: Option<String>,
	pub resource_links: Option<String>,
	pub solution: Option<String>,
	/// Comma-joined list, split during the fold.
	pub subject_ids: Option<String>,
	pub online_readiness: Option<String>,
	pub created_on: Option<String>,
	pub updated_on: Option<String>,
	pub applicable_year: Option<i32>,
	pub body_of_knowledge_id: Option<String>,
	pub body_of_knowledge_subject_id: Option<String>,
	pub body_of_knowledge_initiation_year: Option<i32>,
	pub body_of_knowledge_final_year: Option<i32>,
	pub body_of_knowledge_code: Option<String>,
	pub body_of_knowledge_name: Option<String>,
	pub question_index: Option<i32>,
	pub answering_method: Option<String>,
}
