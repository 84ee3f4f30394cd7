//! The filter-spec compiler.
//!
//! Each facet is described by one [`FacetRule`] in a fixed-order table; one
//! generic builder turns a rule into a clause when the facet is populated.
//! An absent facet contributes no clause. The product-status polarity and the
//! two keyword modes sit outside the tables because they couple clauses
//! across both sides of the query.

use itemdex_domain::{FilterSpec, definition};

use crate::{Query, SortSpec, field};

/// Compiles a filter into the index bool query. Pure and total: invalid or
/// absent facets contribute nothing, the compiler itself never fails.
pub fn compile(spec: &FilterSpec) -> Query {
	let mut must: Vec<Query> = MUST_RULES.iter().filter_map(|rule| rule.build(spec)).collect();
	let status = StatusClause::from_spec(spec);

	if let Some(StatusClause::Include(value)) = &status {
		must.push(nested_terms(
			field::PRODUCT_STATUSES,
			field::PRODUCT_STATUS_STATUS,
			std::slice::from_ref(value),
		));
	}

	// When both keyword modes are populated only the intersection mode
	// compiles; the union list is silently dropped.
	if let FacetValue::Texts(terms) = texts(&spec.must_search_texts) {
		must.push(intersection_text_clause(terms));
	} else if let FacetValue::Texts(terms) = texts(&spec.search_texts) {
		must.push(union_text_clause(terms));
	}

	let mut must_not: Vec<Query> =
		MUST_NOT_RULES.iter().filter_map(|rule| rule.build(spec)).collect();

	if let Some(StatusClause::ExcludeInverse(inverse)) = &status {
		must_not.push(nested_terms(
			field::PRODUCT_STATUSES,
			field::PRODUCT_STATUS_STATUS,
			std::slice::from_ref(inverse),
		));
	}

	Query::Bool { must, must_not, should: Vec::new(), min_should: None }
}

/// Index-level sort for this filter. Empty sort field and the input-order
/// sentinel both mean "no index sort": the former falls back to relevance,
/// the latter defers ordering to the assembler.
pub fn compile_sort(spec: &FilterSpec) -> Option<SortSpec> {
	let sort_field = spec.sort_field.as_deref().filter(|value| !value.is_empty())?;

	if sort_field == definition::SORT_BY_INPUT_IDS {
		return None;
	}

	Some(SortSpec { field: sort_field.to_string(), ascending: spec.ascending })
}

/// Which polarity of product-status clause a filter asks for. Constructed
/// once at the boundary. `off_shelf` never becomes a must clause: on-shelf
/// items are excluded instead, leaving the off-shelf ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusClause {
	Include(String),
	ExcludeInverse(String),
}
impl StatusClause {
	pub fn from_spec(spec: &FilterSpec) -> Option<Self> {
		match spec.product_status.as_deref() {
			None | Some("") => None,
			Some(definition::OFF_SHELF_PRODUCT_STATUS) =>
				Some(Self::ExcludeInverse(definition::ON_SHELF_PRODUCT_STATUS.to_string())),
			Some(value) => Some(Self::Include(value.to_string())),
		}
	}
}

enum FacetValue<'a> {
	Absent,
	Text(&'a str),
	Texts(&'a [String]),
	Flag(bool),
}

fn text(facet: &Option<String>) -> FacetValue<'_> {
	match facet.as_deref() {
		Some(value) if !value.is_empty() => FacetValue::Text(value),
		_ => FacetValue::Absent,
	}
}

fn texts(facet: &Option<Vec<String>>) -> FacetValue<'_> {
	match facet.as_deref() {
		Some(values) if !values.is_empty() => FacetValue::Texts(values),
		_ => FacetValue::Absent,
	}
}

fn flag(facet: &Option<bool>) -> FacetValue<'static> {
	facet.map(FacetValue::Flag).unwrap_or(FacetValue::Absent)
}

enum ClauseKind {
	/// Membership in a set on a flat field.
	Terms,
	/// Membership in a set on a field one level inside an array of objects.
	NestedTerms(&'static str),
	/// Full-phrase match on an analyzed field.
	MatchPhrase,
	/// Exact boolean term.
	TermBool,
	/// Exact boolean term on a nested field.
	NestedTermBool(&'static str),
	/// Tri-state "has X": exists and non-empty, or the negated composition.
	ExistsNonEmpty,
	/// OR-group of full-phrase matches, one per supplied text.
	PhraseSet,
	/// Ordinary match, except the designated sentinel code compiles to the
	/// absent-or-empty composition.
	BodyOfKnowledge,
	/// OR across terms and fields over the keyword field set.
	UnionText,
	/// AND across terms, OR across fields per term, over the same field set.
	IntersectionText,
}

struct FacetRule {
	field: &'static str,
	kind: ClauseKind,
	facet: for<'a> fn(&'a FilterSpec) -> FacetValue<'a>,
}
impl FacetRule {
	fn build(&self, spec: &FilterSpec) -> Option<Query> {
		match (&self.kind, (self.facet)(spec)) {
			(ClauseKind::Terms, FacetValue::Texts(values)) =>
				Some(Query::Terms { field: self.field, values: values.to_vec() }),
			(ClauseKind::Terms, FacetValue::Text(value)) =>
				Some(Query::Terms { field: self.field, values: vec![value.to_string()] }),
			(ClauseKind::NestedTerms(path), FacetValue::Texts(values)) =>
				Some(nested_terms(path, self.field, values)),
			(ClauseKind::MatchPhrase, FacetValue::Text(value)) =>
				Some(match_phrase(self.field, value)),
			(ClauseKind::TermBool, FacetValue::Flag(value)) =>
				Some(Query::Term { field: self.field, value }),
			(ClauseKind::NestedTermBool(path), FacetValue::Flag(value)) =>
				Some(Query::nested(path, Query::Term { field: self.field, value })),
			(ClauseKind::ExistsNonEmpty, FacetValue::Flag(value)) =>
				Some(exists_non_empty(value, self.field)),
			(ClauseKind::PhraseSet, FacetValue::Texts(values)) => Some(Query::bool_should(
				values.iter().map(|value| match_phrase(self.field, value)).collect(),
			)),
			(ClauseKind::BodyOfKnowledge, FacetValue::Text(value)) =>
				if value == definition::NULL_BODY_OF_KNOWLEDGE_CODE {
					Some(exists_non_empty(false, self.field))
				} else {
					Some(match_phrase(self.field, value))
				},
			(ClauseKind::UnionText, FacetValue::Texts(values)) =>
				Some(union_text_clause(values)),
			(ClauseKind::IntersectionText, FacetValue::Texts(values)) =>
				Some(intersection_text_clause(values)),
			_ => None,
		}
	}
}

/// Inclusion facets in their fixed evaluation order.
static MUST_RULES: &[FacetRule] = &[
	FacetRule {
		field: field::SUBJECT_IDS,
		kind: ClauseKind::MatchPhrase,
		facet: |spec| text(&spec.subject_id),
	},
	FacetRule {
		field: field::BODY_OF_KNOWLEDGE_CODES,
		kind: ClauseKind::BodyOfKnowledge,
		facet: |spec| text(&spec.body_of_knowledge_code),
	},
	FacetRule {
		field: field::ITEM_YEAR_YEAR,
		kind: ClauseKind::NestedTerms(field::ITEM_YEARS),
		facet: |spec| texts(&spec.item_years),
	},
	FacetRule {
		field: field::PRODUCT_CODES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.product_codes),
	},
	FacetRule {
		field: field::CATALOG_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.catalog_ids),
	},
	FacetRule {
		field: field::PUBLISH_SOURCES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.publish_sources),
	},
	FacetRule {
		field: field::SOURCES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.sources),
	},
	FacetRule {
		field: field::VERSION_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.version_ids),
	},
	FacetRule {
		field: field::REGULAR_KNOWLEDGE_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.knowledge_ids),
	},
	FacetRule {
		field: field::DISCRETE_KNOWLEDGE_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.discrete_knowledge_ids),
	},
	FacetRule {
		field: field::REGULAR_LESSON_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.lesson_ids),
	},
	FacetRule {
		field: field::DISCRETE_LESSON_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.discrete_lesson_ids),
	},
	FacetRule {
		field: field::RECOGNITION_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.recognition_ids),
	},
	FacetRule {
		field: field::USER_TYPES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.user_types),
	},
	FacetRule {
		field: field::QUESTION_ANSWERING_METHOD,
		kind: ClauseKind::NestedTerms(field::QUESTIONS),
		facet: |spec| texts(&spec.answering_methods),
	},
	FacetRule {
		field: field::SOLUTION,
		kind: ClauseKind::ExistsNonEmpty,
		facet: |spec| flag(&spec.has_solution),
	},
	FacetRule {
		field: field::HAS_VIDEO_URLS,
		kind: ClauseKind::TermBool,
		facet: |spec| flag(&spec.has_video_urls),
	},
	FacetRule {
		field: field::IS_SET,
		kind: ClauseKind::TermBool,
		facet: |spec| flag(&spec.is_set),
	},
	FacetRule {
		field: field::QUESTION_ANSWERS,
		kind: ClauseKind::NestedTerms(field::QUESTIONS),
		facet: |spec| texts(&spec.answers),
	},
	FacetRule {
		field: field::ONLINE_READINESS,
		kind: ClauseKind::MatchPhrase,
		facet: |spec| text(&spec.online_readiness),
	},
	FacetRule {
		field: field::COPYRIGHT,
		kind: ClauseKind::Terms,
		facet: |spec| text(&spec.copyright),
	},
	FacetRule {
		field: field::IS_LITERACY,
		kind: ClauseKind::TermBool,
		facet: |spec| flag(&spec.is_literacy),
	},
	FacetRule {
		field: field::EDITOR_REMARK,
		kind: ClauseKind::PhraseSet,
		facet: |spec| texts(&spec.editor_remarks),
	},
	FacetRule {
		field: field::FILE_NAMES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.file_names),
	},
	FacetRule {
		field: field::QUESTION_LATEX_ANSWERS,
		kind: ClauseKind::NestedTermBool(field::QUESTIONS),
		facet: |spec| flag(&spec.has_latex),
	},
	FacetRule {
		field: field::TOPIC,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.topics),
	},
	FacetRule {
		field: field::IMPORT_RECORD_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.import_record_ids),
	},
	FacetRule {
		field: field::DOCUMENT_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.document_ids),
	},
	FacetRule {
		field: field::DOCUMENT_REPOSITORY_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.document_repository_ids),
	},
	FacetRule { field: field::ID, kind: ClauseKind::Terms, facet: |spec| texts(&spec.ids) },
];

/// Exclusion facets, in their fixed order. Both keyword modes always
/// contribute here; the precedence rule applies only on the inclusion side.
static MUST_NOT_RULES: &[FacetRule] = &[
	FacetRule {
		field: field::LABEL_NAMES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_label_names),
	},
	FacetRule {
		field: field::ITEM_YEAR_YEAR,
		kind: ClauseKind::NestedTerms(field::ITEM_YEARS),
		facet: |spec| texts(&spec.ne_item_years),
	},
	FacetRule {
		field: field::PUBLISH_SOURCES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_publish_sources),
	},
	FacetRule {
		field: field::CATALOG_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_catalog_ids),
	},
	FacetRule {
		field: field::SOURCES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_sources),
	},
	FacetRule {
		field: field::VERSION_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_version_ids),
	},
	FacetRule {
		field: field::REGULAR_KNOWLEDGE_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_knowledge_ids),
	},
	FacetRule {
		field: field::DISCRETE_KNOWLEDGE_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_discrete_knowledge_ids),
	},
	FacetRule {
		field: field::REGULAR_LESSON_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_lesson_ids),
	},
	FacetRule {
		field: field::DISCRETE_LESSON_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_discrete_lesson_ids),
	},
	FacetRule {
		field: field::RECOGNITION_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_recognition_ids),
	},
	FacetRule {
		field: field::USER_TYPES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_user_types),
	},
	FacetRule {
		field: field::QUESTION_ANSWERING_METHOD,
		kind: ClauseKind::NestedTerms(field::QUESTIONS),
		facet: |spec| texts(&spec.ne_answering_methods),
	},
	FacetRule {
		field: field::EDITOR_REMARK,
		kind: ClauseKind::PhraseSet,
		facet: |spec| texts(&spec.ne_editor_remarks),
	},
	FacetRule {
		field: field::FILE_NAMES,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_file_names),
	},
	FacetRule {
		field: field::PREAMBLE,
		kind: ClauseKind::UnionText,
		facet: |spec| texts(&spec.ne_search_texts),
	},
	FacetRule {
		field: field::PREAMBLE,
		kind: ClauseKind::IntersectionText,
		facet: |spec| texts(&spec.ne_must_search_texts),
	},
	FacetRule {
		field: field::IMPORT_RECORD_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_import_record_ids),
	},
	FacetRule {
		field: field::DOCUMENT_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_document_ids),
	},
	FacetRule {
		field: field::DOCUMENT_REPOSITORY_IDS,
		kind: ClauseKind::Terms,
		facet: |spec| texts(&spec.ne_document_repository_ids),
	},
	FacetRule { field: field::ID, kind: ClauseKind::Terms, facet: |spec| texts(&spec.ne_ids) },
];

fn match_phrase(field: &'static str, phrase: &str) -> Query {
	Query::MatchPhrase { field, phrase: phrase.to_string() }
}

fn nested_terms(path: &'static str, field: &'static str, values: &[String]) -> Query {
	Query::nested(path, Query::Terms { field, values: values.to_vec() })
}

fn nested_match_phrase(path: &'static str, field: &'static str, phrase: &str) -> Query {
	Query::nested(path, match_phrase(field, phrase))
}

/// Tri-state "has X". True is exists AND matches-any-wildcard; false is the
/// OR of the two negations with min-match 1, so "exists but empty string"
/// counts as false. The composition is relied on as-is by the sentinel code
/// path, do not simplify it.
fn exists_non_empty(positive: bool, field: &'static str) -> Query {
	let exists = Query::Exists { field };
	let non_empty = Query::Wildcard { field, pattern: "*" };

	if positive {
		Query::bool_must(vec![exists, non_empty])
	} else {
		Query::Bool {
			must: Vec::new(),
			must_not: Vec::new(),
			should: vec![
				Query::Bool {
					must: Vec::new(),
					must_not: vec![exists],
					should: Vec::new(),
					min_should: None,
				},
				Query::Bool {
					must: Vec::new(),
					must_not: vec![non_empty],
					should: Vec::new(),
					min_should: None,
				},
			],
			min_should: Some(1),
		}
	}
}

/// Keyword field set, union mode: per-field phrase clauses for every term,
/// then one terms clause per answer field covering all terms at once.
fn union_text_conditions(terms: &[String]) -> Vec<Query> {
	let mut clauses = Vec::new();

	clauses.extend(terms.iter().map(|term| match_phrase(field::PREAMBLE, term)));
	clauses.extend(terms.iter().map(|term| match_phrase(field::SOLUTION, term)));
	clauses.extend(
		terms.iter().map(|term| nested_match_phrase(field::QUESTIONS, field::QUESTION_STEM, term)),
	);
	clauses.extend(
		terms
			.iter()
			.map(|term| nested_match_phrase(field::QUESTIONS, field::QUESTION_OPTIONS, term)),
	);
	clauses.extend(terms.iter().map(|term| {
		nested_match_phrase(field::QUESTIONS, field::QUESTION_ANSWER_KEYWORDS, term)
	}));
	clauses.push(nested_terms(field::QUESTIONS, field::QUESTION_ANSWERS, terms));
	clauses.push(nested_terms(field::QUESTIONS, field::QUESTION_PROPOSE_ANSWERS, terms));

	clauses
}

fn union_text_clause(terms: &[String]) -> Query {
	Query::bool_should(union_text_conditions(terms))
}

/// Keyword field set, intersection mode: every term must match at least one
/// of the seven fields; the per-term groups are ANDed together.
fn intersection_text_clause(terms: &[String]) -> Query {
	let groups = terms
		.iter()
		.map(|term| {
			let single = std::slice::from_ref(term);

			Query::bool_should(vec![
				match_phrase(field::PREAMBLE, term),
				match_phrase(field::SOLUTION, term),
				nested_match_phrase(field::QUESTIONS, field::QUESTION_STEM, term),
				nested_match_phrase(field::QUESTIONS, field::QUESTION_OPTIONS, term),
				nested_match_phrase(field::QUESTIONS, field::QUESTION_ANSWER_KEYWORDS, term),
				nested_terms(field::QUESTIONS, field::QUESTION_ANSWERS, single),
				nested_terms(field::QUESTIONS, field::QUESTION_PROPOSE_ANSWERS, single),
			])
		})
		.collect();

	Query::bool_must(groups)
}
