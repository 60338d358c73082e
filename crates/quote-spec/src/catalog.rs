//! Reference question list for the cleaning quote wizard.

use crate::spec::form::QuoteForm;
use crate::spec::question::{ChoiceOption, InputKind, QuestionSpec, VisibilityRule};

/// Question ids the pricing estimator reads.
pub mod ids {
    pub const PROPERTY_TYPE: &str = "property_type";
    pub const RESIDENTIAL_AREAS: &str = "residential_areas";
    pub const COMMERCIAL_AREAS: &str = "commercial_areas";
    pub const SERVICES: &str = "services";
    pub const EXTRA_SERVICES: &str = "extra_services";
    pub const FREQUENCY: &str = "frequency";
    pub const HAS_PETS: &str = "has_pets";
    pub const ACCESS_NOTES: &str = "access_notes";
    pub const POSTCODE: &str = "postcode";
}

fn option(value: &str, label: &str) -> ChoiceOption {
    ChoiceOption::new(value, label)
}

pub fn cleaning_quote_form() -> QuoteForm {
    QuoteForm {
        id: "cleaning-quote".into(),
        title: "Get a cleaning quote".into(),
        version: "1.0.0".into(),
        description: Some("Tell us about the space and we will estimate the price.".into()),
        questions: vec![
            QuestionSpec::new(
                ids::PROPERTY_TYPE,
                InputKind::SingleSelect,
                "What type of property needs cleaning?",
            )
            .required()
            .with_options(vec![
                option("house", "House"),
                option("apartment", "Apartment"),
                option("office", "Office"),
                option("other", "Other")
                    .with_sub_options(vec![
                        option("studio", "Studio"),
                        option("retail", "Retail unit"),
                        option("warehouse", "Warehouse"),
                    ])
                    .allowing_custom(),
            ]),
            QuestionSpec::new(
                ids::RESIDENTIAL_AREAS,
                InputKind::CounterGroup,
                "How many of each room?",
            )
            .required()
            .with_options(vec![
                option("kitchen", "Kitchen"),
                option("bedrooms", "Bedrooms"),
                option("bathrooms", "Bathrooms"),
                option("living_rooms", "Living rooms"),
            ])
            .visible_if(VisibilityRule::any_of(
                ids::PROPERTY_TYPE,
                ["house", "apartment"],
            )),
            QuestionSpec::new(
                ids::COMMERCIAL_AREAS,
                InputKind::CounterGroup,
                "Which areas of the office need cleaning?",
            )
            .required()
            .with_options(vec![
                option("workspaces", "Open-plan workspaces"),
                option("meeting_rooms", "Meeting rooms"),
                option("kitchens", "Kitchens"),
                option("restrooms", "Restrooms"),
            ])
            .visible_if(VisibilityRule::equals(ids::PROPERTY_TYPE, "office")),
            QuestionSpec::new(
                ids::SERVICES,
                InputKind::MultiSelect,
                "Which services do you need?",
            )
            .required()
            .with_options(vec![
                option("regular_home", "Regular home clean"),
                option("deep_clean", "Deep clean"),
                option("end_of_tenancy", "End of tenancy clean"),
                option("office_clean", "Office clean"),
                option("after_builders", "After builders clean"),
            ]),
            QuestionSpec::new(
                ids::EXTRA_SERVICES,
                InputKind::MultiSelect,
                "Any extras?",
            )
            .describe("Optional add-ons priced per visit.")
            .with_options(vec![
                option("ironing", "Ironing"),
                option("oven", "Oven clean"),
                option("fridge", "Fridge clean"),
                option("windows", "Interior windows"),
                option("laundry", "Laundry"),
            ]),
            QuestionSpec::new(
                ids::FREQUENCY,
                InputKind::SingleSelect,
                "How often should we come?",
            )
            .required()
            .with_options(vec![
                option("one_time", "One time"),
                option("weekly", "Weekly"),
                option("biweekly", "Every two weeks"),
                option("monthly", "Monthly"),
            ]),
            QuestionSpec::new(ids::HAS_PETS, InputKind::Boolean, "Are there pets at the property?")
                .required(),
            QuestionSpec::new(
                ids::ACCESS_NOTES,
                InputKind::Text,
                "Anything we should know about access?",
            )
            .describe("Key safe codes or parking details."),
            QuestionSpec::new(ids::POSTCODE, InputKind::Text, "What is the postcode?").required(),
        ],
    }
}
