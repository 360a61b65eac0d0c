use serde::{Deserialize, Serialize};

/// The two spending groups that the numeric fields are partitioned into.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// Everyday spending: education, housing, gadgets and so on.
    General,
    /// Spending on personal growth: books, fitness, training.
    Growth,
}

serde_plain::derive_display_from_serialize!(Group);
serde_plain::derive_fromstr_from_deserialize!(Group);

/// Every input the reflection form collects, in display order.
///
/// The declaration order is significant: `Ord` follows it, and both the on-screen form and the
/// summary document list fields in this order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Education,
    HouseAndCar,
    Gadgets,
    Entertainment,
    Fashion,
    Travel,
    OtherInvestments,
    Books,
    Fitness,
    Training,
    /// Free text, never summed.
    Reflection,
}

serde_plain::derive_display_from_serialize!(Field);
serde_plain::derive_fromstr_from_deserialize!(Field);

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 11] = [
        Field::Education,
        Field::HouseAndCar,
        Field::Gadgets,
        Field::Entertainment,
        Field::Fashion,
        Field::Travel,
        Field::OtherInvestments,
        Field::Books,
        Field::Fitness,
        Field::Training,
        Field::Reflection,
    ];

    /// The label used for this field in the summary document.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Education => "Education",
            Field::HouseAndCar => "House & Car",
            Field::Gadgets => "Mobiles & Laptops",
            Field::Entertainment => "Entertainment",
            Field::Fashion => "Clothing & Fashion",
            Field::Travel => "Travel & Picnics",
            Field::OtherInvestments => "Other Investments",
            Field::Books => "Books & Resources",
            Field::Fitness => "Gym/Yoga",
            Field::Training => "Training & Courses",
            Field::Reflection => "Personal Reflection",
        }
    }

    /// The question shown by the input collector. Numeric fields carry a currency hint.
    pub fn prompt(&self, currency_symbol: &str) -> String {
        let text = match self {
            Field::Education => "🏫 School/College Education",
            Field::HouseAndCar => "🏠 House & Car",
            Field::Gadgets => "📱 Mobiles & Laptops",
            Field::Entertainment => "🎥 Entertainment",
            Field::Fashion => "🧥 Clothing & Fashion",
            Field::Travel => "🏖️ Travel & Picnics",
            Field::OtherInvestments => "📈 Other Investments",
            Field::Books => "📘 Books & Knowledge Resources",
            Field::Fitness => "🏋️ Gym/Yoga/Meditation",
            Field::Training => "👔 Training & Courses",
            Field::Reflection => {
                return "🧠 What will you change about your investment approach going forward?"
                    .to_string()
            }
        };
        format!("{text} ({currency_symbol})")
    }

    /// The group this field is summed into, `None` for free text.
    pub fn group(&self) -> Option<Group> {
        match self {
            Field::Education
            | Field::HouseAndCar
            | Field::Gadgets
            | Field::Entertainment
            | Field::Fashion
            | Field::Travel
            | Field::OtherInvestments => Some(Group::General),
            Field::Books | Field::Fitness | Field::Training => Some(Group::Growth),
            Field::Reflection => None,
        }
    }

    /// Whether the field holds free text rather than an amount.
    pub fn is_free_text(&self) -> bool {
        self.group().is_none()
    }

    /// The fields that belong to `group`, in display order.
    pub fn in_group(group: Group) -> impl Iterator<Item = Field> {
        Field::ALL
            .into_iter()
            .filter(move |field| field.group() == Some(group))
    }
}
