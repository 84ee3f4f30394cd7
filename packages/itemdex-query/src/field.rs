//! Index field paths addressed by the compiler.

pub const ID: &str = "id";
pub const SUBJECT_IDS: &str = "subjectIds";
pub const BODY_OF_KNOWLEDGE_CODES: &str = "bodyOfKnowledgeCodes";
pub const LABEL_NAMES: &str = "labelNames";
pub const PRODUCT_CODES: &str = "productCodes";
pub const CATALOG_IDS: &str = "catalogIds";
pub const PUBLISH_SOURCES: &str = "publishSources";
pub const SOURCES: &str = "sources";
pub const VERSION_IDS: &str = "versionIds";
pub const REGULAR_KNOWLEDGE_IDS: &str = "regularKnowledgeIds";
pub const DISCRETE_KNOWLEDGE_IDS: &str = "discreteKnowledgeIds";
pub const REGULAR_LESSON_IDS: &str = "regularLessonIds";
pub const DISCRETE_LESSON_IDS: &str = "discreteLessonIds";
pub const RECOGNITION_IDS: &str = "recognitionIds";
pub const USER_TYPES: &str = "userTypes";
pub const FILE_NAMES: &str = "fileNames";
pub const IMPORT_RECORD_IDS: &str = "importRecordIds";
pub const DOCUMENT_IDS: &str = "documentIds";
pub const DOCUMENT_REPOSITORY_IDS: &str = "documentRepositoryIds";
pub const ONLINE_READINESS: &str = "onlineReadiness";
pub const COPYRIGHT: &str = "copyright";
pub const IS_LITERACY: &str = "isLiteracy";
pub const IS_SET: &str = "isSet";
pub const HAS_VIDEO_URLS: &str = "hasVideoUrls";
pub const EDITOR_REMARK: &str = "editorRemark";
pub const TOPIC: &str = "topic";
pub const SOLUTION: &str = "solution";
pub const PREAMBLE: &str = "preamble";

// Nested paths: a condition on these must hold within one array element.
pub const ITEM_YEARS: &str = "itemYears";
pub const ITEM_YEAR_YEAR: &str = "itemYears.year";
pub const PRODUCT_STATUSES: &str = "productStatuses";
pub const PRODUCT_STATUS_STATUS: &str = "productStatuses.status";
pub const QUESTIONS: &str = "questions";
pub const QUESTION_STEM: &str = "questions.stem";
pub const QUESTION_OPTIONS: &str = "questions.options";
pub const QUESTION_ANSWER_KEYWORDS: &str = "questions.answerKeywords";
pub const QUESTION_ANSWERING_METHOD: &str = "questions.answeringMethod";
pub const QUESTION_ANSWERS: &str = "questions.answers";
pub const QUESTION_PROPOSE_ANSWERS: &str = "questions.proposeAnswers";
pub const QUESTION_LATEX_ANSWERS: &str = "questions.latexAnswers";
