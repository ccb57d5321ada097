use serde::{Deserialize, Serialize};

/// Categorises bills for summaries and reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Category {
    Housing,
    Education,
    Food,
    Transport,
    Entertainment,
    Utilities,
    Health,
    Income,
    Investment,
    #[default]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Housing => "Moradia",
            Category::Education => "Educação",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Entertainment => "Lazer",
            Category::Utilities => "Utilidades",
            Category::Health => "Saúde",
            Category::Income => "Renda/Salário",
            Category::Investment => "Investimento",
            Category::Other => "Outros",
        }
    }
}
