#[cfg(feature = "serde")]
use serde::Serialize;

/// A starter diagram offered from the template menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DiagramTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub code: &'static str,
}

/// Document shown when nothing has been persisted yet.
pub const DEFAULT_DIAGRAM: &str = r#"graph TD
    A["Christmas"] -->|"Get money"| B["Go shopping"]
    B --> C{"Let me think"}
    C -->|"One"| D["Laptop"]
    C -->|"Two"| E["iPhone"]
    C -->|"Three"| F["Car"]"#;

pub const TEMPLATES: &[DiagramTemplate] = &[
    DiagramTemplate {
        id: "flowchart",
        name: "Flowchart",
        icon: "📊",
        code: r#"graph TD
    Start["Start"] --> Process["Process"]
    Process --> Decision{"Is it working?"}
    Decision -->|"Yes"| Success["Success"]
    Decision -->|"No"| Fix["Fix the issue"]
    Fix --> Process"#,
    },
    DiagramTemplate {
        id: "sequence",
        name: "Sequence Diagram",
        icon: "🔄",
        code: r#"sequenceDiagram
    Alice->>John: "Hello John, how are you?"
    John-->>Alice: "Great!"
    Alice->>John: "See you later!""#,
    },
    DiagramTemplate {
        id: "gantt",
        name: "Gantt Chart",
        icon: "📅",
        code: r#"gantt
    title "A Gantt Diagram"
    section "Section"
    "A task"           :a1, 2023-01-01, 30d
    "Another task"     :after a1  , 20d"#,
    },
    DiagramTemplate {
        id: "class",
        name: "Class Diagram",
        icon: "🏛️",
        code: r#"classDiagram
    Animal <|-- Duck
    Animal <|-- Fish
    Animal <|-- Zebra
    Animal : "+int age"
    Animal : "+String gender"
    Animal: "+isMammal()"
    Animal: "+mate()""#,
    },
    DiagramTemplate {
        id: "er",
        name: "ER Diagram",
        icon: "🔗",
        code: r#"erDiagram
    CUSTOMER ||--o{ ORDER : "places"
    ORDER ||--|{ LINE-ITEM : "contains"
    CUSTOMER }|..|{ DELIVERY-ADDRESS : "uses""#,
    },
];

/// Look a template up by its id.
pub fn template(id: &str) -> Option<&'static DiagramTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}
