//! Fixed term lists used by the resume extractor.
//!
//! Matching is by lower-case substring, so short entries such as `r` or `go`
//! fire on almost any text. The lists are kept as-is so local extraction stays
//! comparable with what the scoring service was tuned against.

/// Tokens dropped from keyword extraction regardless of frequency.
pub const STOP_WORDS: &[&str] = &["and", "the", "to", "of", "a", "in", "for", "with", "on", "at"];

/// Known skill terms, scanned for in resume text.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "javascript", "python", "java", "c++", "c#", "php", "ruby", "go", "rust", "swift",
    "kotlin", "scala", "perl", "r", "matlab", "typescript", "dart", "bash", "powershell",
    // Web
    "html", "css", "sass", "less", "bootstrap", "tailwind", "material-ui", "jquery",
    "react", "angular", "vue", "svelte", "next.js", "nuxt", "gatsby", "webpack", "babel",
    "responsive design", "progressive web apps", "spa", "ssr", "pwa",
    // Backend
    "nodejs", "express", "django", "flask", "spring", "laravel", "asp.net", "rails",
    "fastapi", "graphql", "rest", "api", "microservices", "websockets", "grpc",
    // Databases
    "sql", "nosql", "mongodb", "mysql", "postgresql", "oracle", "sqlite", "redis",
    "elasticsearch", "cassandra", "dynamodb", "firebase", "neo4j", "couchdb",
    // DevOps & cloud
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "gitlab-ci",
    "github actions", "terraform", "ansible", "ci/cd", "linux", "unix", "nginx",
    "apache", "serverless", "lambda", "cloud functions",
    // Testing
    "testing", "unit testing", "integration testing", "jest", "mocha", "cypress",
    "selenium", "puppeteer", "junit", "pytest", "tdd", "bdd", "qa",
    // Data
    "data analysis", "machine learning", "artificial intelligence", "nlp",
    "computer vision", "big data", "hadoop", "spark", "tableau", "power bi",
    "data visualization", "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn",
    // General
    "problem solving", "critical thinking", "teamwork", "communication",
    "leadership", "time management", "project management", "agile", "scrum",
    "kanban", "product management", "git", "github", "bitbucket", "jira",
    "confluence", "slack",
    // Design
    "ui/ux", "design thinking", "figma", "sketch", "adobe xd", "photoshop",
    "illustrator", "indesign", "after effects", "premiere pro",
    // Marketing & content
    "seo", "sem", "content marketing", "social media marketing", "email marketing",
    "copywriting", "content writing", "technical writing", "blog writing",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "ionic",
    "objective-c", "mobile development",
];

/// Unioned into the extracted skills when fewer than
/// [`MIN_SKILLS_BEFORE_DEFAULTS`] were found.
pub const DEFAULT_SKILLS: &[&str] = &[
    "javascript",
    "html",
    "css",
    "communication",
    "problem solving",
    "teamwork",
    "time management",
    "critical thinking",
];

/// Below this many full-text matches, bullet lines are scanned as well.
pub const MIN_SKILLS_BEFORE_BULLET_SCAN: usize = 3;

pub const MIN_SKILLS_BEFORE_DEFAULTS: usize = 5;

/// Degree levels and institution types.
pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "degree",
    "bs", "ba", "ms", "ma", "mba", "bsc", "btech", "mtech",
    "university", "college", "institute", "school",
];

/// Degree subjects / majors.
pub const DEGREES: &[&str] = &[
    "computer science", "information technology", "data science",
    "business administration", "marketing", "finance", "economics",
    "engineering", "electrical engineering", "mechanical engineering",
    "psychology", "biology", "chemistry", "physics", "mathematics",
];
