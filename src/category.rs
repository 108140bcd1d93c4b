/// One of the four PS Plus catalogue segments. Each maps to exactly one
/// upstream game list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Games,
    Ubisoft,
    Classics,
    Monthly,
}

impl Category {
    /// Every category, in upstream fetch order.
    pub const ALL: [Category; 4] = [
        Category::Games,
        Category::Ubisoft,
        Category::Classics,
        Category::Monthly,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Ubisoft => "ubisoft",
            Self::Classics => "classics",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "games" => Some(Self::Games),
            "ubisoft" => Some(Self::Ubisoft),
            "classics" => Some(Self::Classics),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Games => "Games catalogue",
            Self::Ubisoft => "Ubisoft+ classics",
            Self::Classics => "Classics catalogue",
            Self::Monthly => "Monthly games",
        }
    }

    /// The `categoryList` identifier the upstream game list expects.
    pub fn list_id(&self) -> &'static str {
        match self {
            Self::Games => "plus-games-list",
            Self::Ubisoft => "ubisoft-classics-list",
            Self::Classics => "plus-classics-list",
            Self::Monthly => "plus-monthly-games-list",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
