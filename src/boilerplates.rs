use crate::models::{Boilerplate, BoilerplateIcon, Shortcut};

/// Starter repositories offered by the `php bones` CLI and the website.
pub static BOILERPLATES: &[Boilerplate] = &[
    Boilerplate {
        slug: "base",
        name: "WPKirk-Boilerplate",
        title: "Starter Boilerplate",
        subtitle: "The most used starting point for WP Bones plugins",
        icon: BoilerplateIcon::File("star.svg"),
        shortcut: Some(Shortcut {
            modifiers: &["cmd", "shift"],
            key: "b",
        }),
        keywords: &["starter", "routes"],
    },
    Boilerplate {
        slug: "api",
        name: "WPKirk-API-Boilerplate",
        title: "API",
        subtitle: "How to create a REST API for WP Bones",
        icon: BoilerplateIcon::File("api.svg"),
        shortcut: None,
        keywords: &["api", "rest", "json", "endpoint", "endpoints"],
    },
    Boilerplate {
        slug: "cron",
        name: "WPKirk-Cron-Boilerplate",
        title: "Cron",
        subtitle: "How to create a Cron Schedule for WP Bones",
        icon: BoilerplateIcon::Source { source: "Clock" },
        shortcut: None,
        keywords: &["cron", "schedule", "schedules", "task", "tasks"],
    },
    Boilerplate {
        slug: "database",
        name: "WPKirk-Database-Boilerplate",
        title: "Database",
        subtitle: "How to manage database in WP Bones",
        icon: BoilerplateIcon::File("database-cog.svg"),
        shortcut: None,
        keywords: &[
            "db", "database", "sql", "mysql", "mariadb", "model", "models", "table", "tables",
            "illuminate", "eloquent", "query", "queries", "orm", "migration", "migrations",
            "seed", "seeds",
        ],
    },
    Boilerplate {
        slug: "hooks",
        name: "WPKirk-Hooks-Boilerplate",
        title: "Hooks",
        subtitle: "How to use Hooks and Modules for WP Bones",
        icon: BoilerplateIcon::Source { source: "Code" },
        shortcut: None,
        keywords: &["hooks", "actions", "filters", "modules"],
    },
    Boilerplate {
        slug: "internationalization",
        name: "WPKirk-Internationalization-Boilerplate",
        title: "Internationalization",
        subtitle: "How to localize your WP Bones plugin",
        icon: BoilerplateIcon::File("language.svg"),
        shortcut: None,
        keywords: &["internationalization", "localize", "localization", "languages"],
    },
    Boilerplate {
        slug: "mantine",
        name: "WPKirk-Mantine-Boilerplate",
        title: "Mantine UI",
        subtitle: "How to use Mantine UI with WP Bones",
        icon: BoilerplateIcon::File("brand-mantine.svg"),
        shortcut: None,
        keywords: &["reactjs", "react", "javascript", "jsx", "components", "mantine", "ui"],
    },
    Boilerplate {
        slug: "options",
        name: "WPKirk-Options-Boilerplate",
        title: "Options",
        subtitle: "How to use Options with WP Bones",
        icon: BoilerplateIcon::Source { source: "Code" },
        shortcut: None,
        keywords: &["options", "form", "controller", "resource", "post"],
    },
    Boilerplate {
        slug: "reactjs",
        name: "WPKirk-ReactJS-Boilerplate",
        title: "ReactJS",
        subtitle: "How to use ReactJS with WP Bones",
        icon: BoilerplateIcon::File("brand-react.svg"),
        shortcut: None,
        keywords: &["reactjs", "react", "javascript", "jsx", "components"],
    },
    Boilerplate {
        slug: "routes",
        name: "WPKirk-Routes-Boilerplate",
        title: "Routes",
        subtitle: "How to handle routes for WP Bones",
        icon: BoilerplateIcon::File("arrow-guide.svg"),
        shortcut: None,
        keywords: &["starter", "routes"],
    },
    Boilerplate {
        slug: "typescript",
        name: "WPKirk-Typescript-Boilerplate",
        title: "Typescript",
        subtitle: "How to create a Typescript application for WP Bones",
        icon: BoilerplateIcon::Source { source: "Code" },
        shortcut: None,
        keywords: &["typescript", "js", "javascript", "ts", "types"],
    },
    Boilerplate {
        slug: "deprecated",
        name: "WPKirk",
        title: "Complete Demo",
        subtitle: "The complete demo for WP Bones",
        icon: BoilerplateIcon::File("box.svg"),
        shortcut: None,
        keywords: &["demo", "routes"],
    },
];
