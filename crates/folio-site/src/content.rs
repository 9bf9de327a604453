#![forbid(unsafe_code)]

//! Static content tables.
//!
//! Projects, skills, the career timeline and the option lists used by the
//! contact form. Everything here is plain data; pages decide how to show it.

/// Category a project is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectCategory {
    Fullstack,
    Mobile,
    Frontend,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [Self::Fullstack, Self::Mobile, Self::Frontend];

    /// Identifier used in action strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fullstack => "fullstack",
            Self::Mobile => "mobile",
            Self::Frontend => "frontend",
        }
    }

    /// Label shown on the filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fullstack => "Full-Stack",
            Self::Mobile => "Mobile Apps",
            Self::Frontend => "Frontend",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Headline numbers shown on a project card. Absent metrics are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub users: Option<&'static str>,
    pub downloads: Option<&'static str>,
    pub performance: Option<&'static str>,
}

impl Metrics {
    /// No metrics at all.
    pub const EMPTY: Metrics = Metrics {
        users: None,
        downloads: None,
        performance: None,
    };

    /// Present metrics as `(label, value)` pairs.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("Users", self.users),
            ("Downloads", self.downloads),
            ("Performance", self.performance),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Longer write-up shown when the card is expanded.
    pub details: &'static str,
    pub technologies: &'static [&'static str],
    pub category: ProjectCategory,
    pub platform: &'static str,
    pub featured: bool,
    pub image: &'static str,
    pub metrics: Metrics,
    pub live_url: Option<&'static str>,
    pub source_url: Option<&'static str>,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "harbor",
        title: "Harbor Logistics Portal",
        description: "Shipment tracking and dispatch dashboard for a regional freight company.",
        details: "Replaced a spreadsheet workflow with live route boards, driver check-ins and \
                  automated customer notifications. Cut dispatch time per load roughly in half.",
        technologies: &["React", "TypeScript", "Node.js", "PostgreSQL", "Redis"],
        category: ProjectCategory::Fullstack,
        platform: "Web",
        featured: true,
        image: "/images/projects/harbor.jpg",
        metrics: Metrics {
            users: Some("1.2k"),
            downloads: None,
            performance: Some("48% faster dispatch"),
        },
        live_url: Some("https://example.com/harbor"),
        source_url: None,
    },
    Project {
        id: "trailmate",
        title: "TrailMate",
        description: "Offline-first hiking companion with route recording and elevation profiles.",
        details: "Tiles and trail data sync in the background; recordings survive days without \
                  signal and upload when a connection returns.",
        technologies: &["React Native", "Expo", "SQLite", "Mapbox"],
        category: ProjectCategory::Mobile,
        platform: "iOS & Android",
        featured: true,
        image: "/images/projects/trailmate.jpg",
        metrics: Metrics {
            users: None,
            downloads: Some("25k+"),
            performance: Some("4.8 store rating"),
        },
        live_url: None,
        source_url: Some("https://github.com/example/trailmate"),
    },
    Project {
        id: "ledgerly",
        title: "Ledgerly",
        description: "Invoicing and expense tracking for freelancers, with bank statement import.",
        details: "Multi-currency ledgers, recurring invoices and a reconciliation view that \
                  matches imported statements against open invoices.",
        technologies: &["Next.js", "TypeScript", "Prisma", "PostgreSQL", "Stripe"],
        category: ProjectCategory::Fullstack,
        platform: "Web",
        featured: true,
        image: "/images/projects/ledgerly.jpg",
        metrics: Metrics {
            users: Some("3.4k"),
            downloads: None,
            performance: None,
        },
        live_url: Some("https://example.com/ledgerly"),
        source_url: None,
    },
    Project {
        id: "palette",
        title: "Palette Studio",
        description: "Browser-based color system generator with contrast checks and token export.",
        details: "Generates accessible tonal scales from a seed color and exports design tokens \
                  for CSS, Tailwind and Figma.",
        technologies: &["Vue", "Vite", "Canvas API"],
        category: ProjectCategory::Frontend,
        platform: "Web",
        featured: false,
        image: "/images/projects/palette.jpg",
        metrics: Metrics {
            users: Some("8k monthly"),
            downloads: None,
            performance: Some("100 Lighthouse"),
        },
        live_url: Some("https://example.com/palette"),
        source_url: Some("https://github.com/example/palette"),
    },
    Project {
        id: "pulse",
        title: "Pulse Fitness",
        description: "Workout planner with adaptive programs and wearable sync.",
        details: "Programs adjust weekly from logged sets and heart-rate data pulled from \
                  HealthKit and Google Fit.",
        technologies: &["Flutter", "Dart", "Firebase"],
        category: ProjectCategory::Mobile,
        platform: "iOS & Android",
        featured: false,
        image: "/images/projects/pulse.jpg",
        metrics: Metrics {
            users: None,
            downloads: Some("10k+"),
            performance: None,
        },
        live_url: None,
        source_url: None,
    },
    Project {
        id: "atlas",
        title: "Atlas Docs",
        description: "Documentation site theme with instant search and versioned content.",
        details: "Static generation with a client-side search index under 60 kB; deployed for \
                  three open-source projects.",
        technologies: &["Astro", "TypeScript", "Tailwind CSS"],
        category: ProjectCategory::Frontend,
        platform: "Web",
        featured: false,
        image: "/images/projects/atlas.jpg",
        metrics: Metrics::EMPTY,
        live_url: Some("https://example.com/atlas"),
        source_url: Some("https://github.com/example/atlas"),
    },
];

/// Projects shown on the home page.
pub fn featured_projects() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|p| p.featured)
}

pub fn project(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|p| p.id == id)
}

// ─────────────────────────────────────────────────────────────────────────────
// Skills
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkillCategory {
    #[default]
    Frontend,
    Backend,
    Mobile,
    Databases,
    Tools,
    Creative,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        Self::Frontend,
        Self::Backend,
        Self::Mobile,
        Self::Databases,
        Self::Tools,
        Self::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Mobile => "mobile",
            Self::Databases => "databases",
            Self::Tools => "tools",
            Self::Creative => "creative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Mobile => "Mobile",
            Self::Databases => "Databases",
            Self::Tools => "Tools & DevOps",
            Self::Creative => "Creative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn skills(self) -> &'static [Skill] {
        match self {
            Self::Frontend => FRONTEND,
            Self::Backend => BACKEND,
            Self::Mobile => MOBILE,
            Self::Databases => DATABASES,
            Self::Tools => TOOLS,
            Self::Creative => CREATIVE,
        }
    }
}

/// A skill with a self-assessed level from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u8,
    pub description: &'static str,
}

/// Highest skill level.
pub const MAX_LEVEL: u8 = 5;

const fn skill(name: &'static str, level: u8, description: &'static str) -> Skill {
    Skill {
        name,
        level,
        description,
    }
}

const FRONTEND: &[Skill] = &[
    skill("React", 5, "Hooks, context, suspense and large component libraries"),
    skill("TypeScript", 5, "Strict typing across front and back end"),
    skill("Vue", 4, "Composition API and Pinia stores"),
    skill("CSS & Tailwind", 4, "Responsive layouts and design systems"),
    skill("Accessibility", 3, "Semantic markup, focus management, ARIA"),
];

const BACKEND: &[Skill] = &[
    skill("Node.js", 5, "REST and GraphQL services, background jobs"),
    skill("Rust", 3, "Command-line tools and WebAssembly modules"),
    skill("Python", 4, "Data pipelines and Django services"),
    skill("GraphQL", 4, "Schema design and federated gateways"),
];

const MOBILE: &[Skill] = &[
    skill("React Native", 5, "Cross-platform apps with native modules"),
    skill("Flutter", 3, "Widget trees and platform channels"),
    skill("Expo", 4, "Managed workflow and OTA updates"),
];

const DATABASES: &[Skill] = &[
    skill("PostgreSQL", 4, "Schema design, indexing and query tuning"),
    skill("Redis", 4, "Caching, queues and rate limiting"),
    skill("MongoDB", 3, "Document modelling and aggregation"),
    skill("SQLite", 4, "Embedded and offline-first storage"),
];

const TOOLS: &[Skill] = &[
    skill("Git", 5, "Branching strategies and code review"),
    skill("Docker", 4, "Multi-stage builds and compose setups"),
    skill("CI/CD", 4, "GitHub Actions pipelines and preview deploys"),
    skill("AWS", 3, "Lambda, S3, CloudFront and RDS"),
];

const CREATIVE: &[Skill] = &[
    skill("Figma", 4, "Prototypes and component libraries"),
    skill("Illustration", 4, "Vector and digital painting"),
    skill("Motion", 3, "UI animation and micro-interactions"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Timeline
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Work,
    Education,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Education => "education",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub achievements: &'static [&'static str],
    pub technologies: &'static [&'static str],
    pub kind: EntryKind,
}

pub const TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        title: "Senior Full-Stack Developer",
        company: "Northwind Studio",
        location: "Remote",
        period: "2022 - Present",
        description: "Lead developer for client web and mobile products.",
        achievements: &[
            "Shipped eight client products from discovery to launch",
            "Introduced typed API contracts shared by web and mobile",
            "Mentored four junior developers",
        ],
        technologies: &["React", "React Native", "Node.js", "PostgreSQL"],
        kind: EntryKind::Work,
    },
    TimelineEntry {
        title: "Frontend Developer",
        company: "Brightline Media",
        location: "Lisbon, Portugal",
        period: "2019 - 2022",
        description: "Built the editorial tools and public site for a digital publisher.",
        achievements: &[
            "Rebuilt the article editor with collaborative drafts",
            "Halved page weight on the public site",
        ],
        technologies: &["Vue", "TypeScript", "GraphQL"],
        kind: EntryKind::Work,
    },
    TimelineEntry {
        title: "Junior Web Developer",
        company: "Copperleaf Agency",
        location: "Porto, Portugal",
        period: "2017 - 2019",
        description: "Marketing sites and e-commerce storefronts for small businesses.",
        achievements: &["Delivered over thirty client sites"],
        technologies: &["JavaScript", "PHP", "MySQL"],
        kind: EntryKind::Work,
    },
    TimelineEntry {
        title: "BSc Computer Science",
        company: "University of Porto",
        location: "Porto, Portugal",
        period: "2013 - 2017",
        description: "Focus on human-computer interaction and distributed systems.",
        achievements: &["Final project on offline-first mobile sync"],
        technologies: &["Java", "C", "Python"],
        kind: EntryKind::Education,
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// About
// ─────────────────────────────────────────────────────────────────────────────

pub const BIO: &[&str] = &[
    "I build web and mobile products end to end, from the database schema to the last \
     animation curve.",
    "Before writing code full time I worked as an illustrator, and I still care about how \
     software looks and feels as much as how it runs.",
    "These days I split my time between client work, open-source tooling and drawing.",
];

pub const STATS: &[(&str, &str)] = &[
    ("Years of experience", "8+"),
    ("Projects shipped", "40+"),
    ("Happy clients", "25+"),
];

pub const INTERESTS: &[&str] = &["Illustration", "Trail running", "Synthesizers", "Open source"];

/// Technologies listed in the home page hero.
pub const TECH_STACK: &[&str] = &[
    "React",
    "TypeScript",
    "Node.js",
    "React Native",
    "PostgreSQL",
    "Figma",
];

// ─────────────────────────────────────────────────────────────────────────────
// Contact form options
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectType {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const PROJECT_TYPES: &[ProjectType] = &[
    ProjectType {
        value: "web-development",
        label: "Web Development",
        description: "Websites and web applications",
    },
    ProjectType {
        value: "mobile-app",
        label: "Mobile App",
        description: "iOS and Android applications",
    },
    ProjectType {
        value: "fullstack",
        label: "Full-Stack Solution",
        description: "End-to-end product development",
    },
    ProjectType {
        value: "illustration",
        label: "Digital Design",
        description: "Illustration and visual design",
    },
    ProjectType {
        value: "consultation",
        label: "Technical Consultation",
        description: "Architecture and code review",
    },
];

/// `(value, label)` pairs; the empty value is the unselected placeholder.
pub const BUDGET_OPTIONS: &[(&str, &str)] = &[
    ("", "Select budget range"),
    ("<5k", "Under $5,000"),
    ("5k-10k", "$5,000 - $10,000"),
    ("10k-25k", "$10,000 - $25,000"),
    ("25k+", "$25,000+"),
    ("discuss", "Let's discuss"),
];

pub const TIMELINE_OPTIONS: &[(&str, &str)] = &[
    ("", "Select timeline"),
    ("asap", "ASAP"),
    ("1-2weeks", "1-2 weeks"),
    ("1month", "1 month"),
    ("2-3months", "2-3 months"),
    ("flexible", "Flexible"),
];
