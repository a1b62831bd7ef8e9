//! Fixed lexicons and pattern tables for project-context extraction
//!
//! All extraction heuristics live here as data, not code. The tables are
//! scanned case-insensitively against the lowercased conversation corpus;
//! order is significant (first entry wins ties).

/// Known AWS service lexicon: canonical name -> trigger substrings.
///
/// Trigger substrings are matched against the lowercased corpus. The
/// match count of a service is the total occurrence count of all of its
/// triggers.
pub const SERVICE_LEXICON: &[(&str, &[&str])] = &[
    ("LAMBDA", &["lambda", "serverless"]),
    ("EC2", &["ec2", "t2.", "t3.", "m5.", "virtual machine", "instancia"]),
    ("RDS", &["rds", "aurora", "mysql", "postgres", "relational database"]),
    ("S3", &["s3", "bucket", "object storage"]),
    ("DYNAMODB", &["dynamodb", "dynamo"]),
    ("LEX", &["amazon lex", "chatbot", "bot conversacional"]),
    ("API_GATEWAY", &["api gateway", "apigateway"]),
    ("VPC", &["vpc", "red privada"]),
    ("CLOUDFRONT", &["cloudfront", "cdn"]),
    ("SES", &["amazon ses", "simple email"]),
    ("ELB", &["elb", "load balancer", "balanceador"]),
    ("EKS", &["eks", "kubernetes"]),
    ("ECS", &["ecs", "fargate", "contenedor"]),
    ("COGNITO", &["cognito", "user pool"]),
    ("SQS", &["sqs", "message queue", "cola de mensajes"]),
    ("SNS", &["sns", "push notification"]),
    ("CLOUDWATCH", &["cloudwatch"]),
    ("SAGEMAKER", &["sagemaker", "machine learning", "aprendizaje automatico"]),
];

/// Fallback service name when no lexicon entry matches.
pub const FALLBACK_SERVICE: &str = "AWS";

/// Need-expression patterns (Spanish and English), applied per sentence.
pub const NEED_PATTERNS: &[&str] = &[
    r"(?i)necesito",
    r"(?i)requiero",
    r"(?i)quiero",
    r"(?i)busco",
    r"(?i)problema",
    r"(?i)soluci[oó]n",
    r"(?i)implementar",
    r"(?i)desarrollar",
    r"(?i)sistema",
    r"(?i)aplicaci[oó]n",
    r"(?i)crear",
    r"(?i)construir",
    r"(?i)i need",
    r"(?i)i want",
    r"(?i)to implement",
    r"(?i)to create",
];

/// Objective-expression patterns (Spanish and English), applied per sentence.
pub const OBJECTIVE_PATTERNS: &[&str] = &[
    r"(?i)objetivo",
    r"(?i)\bmeta\b",
    r"(?i)prop[oó]sito",
    r"(?i)finalidad",
    r"(?i)\bpara\b",
    r"(?i)con el fin de",
    r"(?i)lograr",
    r"(?i)conseguir",
    r"(?i)beneficio",
    r"(?i)objective",
    r"(?i)\bgoal\b",
    r"(?i)so that",
    r"(?i)to achieve",
];

/// Greeting set: user turns matching these never become the project name.
pub const GREETINGS: &[&str] = &["hello", "hi", "hola", "buenos dias", "buenos días", "buenas tardes"];

/// Terms marking a broad, multi-service engagement.
pub const INTEGRAL_TERMS: &[&str] = &[
    "migration",
    "migracion",
    "migración",
    "new application",
    "nueva aplicacion",
    "modernization",
    "modernizacion",
    "analytics",
    "analitica",
    "security",
    "seguridad",
    "machine learning",
    " ml ",
    "iot",
    "data lake",
    "networking",
    "drp",
    "vdi",
    "integration",
    "integracion",
];

/// Terms marking a single-service quick engagement.
pub const QUICK_TERMS: &[&str] = &[
    "ec2", "rds", "ses", "vpn", "elb", "s3", "vpc", "cloudfront", "sso", "backup",
    "quick service", "servicio rapido",
];

/// Default objective per primary service, used when no objective
/// sentence is found in the conversation.
pub const DEFAULT_OBJECTIVES: &[(&str, &str)] = &[
    ("LAMBDA", "Run event-driven business logic without managing servers."),
    ("EC2", "Provision reliable compute capacity sized to the workload."),
    ("RDS", "Operate a managed relational database with automated backups."),
    ("S3", "Store and serve project data with durable object storage."),
    ("DYNAMODB", "Serve low-latency key-value access at any scale."),
    ("LEX", "Automate customer conversations with a managed chatbot."),
    ("API_GATEWAY", "Expose project APIs behind a managed, throttled front door."),
    ("VPC", "Isolate project workloads inside a private network."),
    ("CLOUDFRONT", "Deliver content globally with low latency."),
];

/// Generic objective fallback when the primary service has no table entry.
pub const GENERIC_OBJECTIVE: &str = "Deliver a scalable, secure, efficient AWS solution.";

/// Fallback project name when no user turn qualifies.
pub const FALLBACK_NAME: &str = "AWS Project";
