use crate::entities::product::ProductCategory;

/// Per-category defaults applied when cataloging a product: storage
/// instructions used as the fallback description, a floor under the
/// requested reorder point, and handling/compliance tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBlueprint {
    pub category: ProductCategory,
    pub storage_instructions: &'static str,
    pub min_reorder_point: i32,
    pub compliance_tags: &'static [&'static str],
}

const STANDARD: CategoryBlueprint = CategoryBlueprint {
    category: ProductCategory::Standard,
    storage_instructions: "General storage, no special handling required",
    min_reorder_point: 5,
    compliance_tags: &[],
};

const PERISHABLE: CategoryBlueprint = CategoryBlueprint {
    category: ProductCategory::Perishable,
    storage_instructions: "Keep refrigerated, rotate stock first-expired-first-out",
    min_reorder_point: 15,
    compliance_tags: &["cold-chain", "expiry-tracked"],
};

const FRAGILE: CategoryBlueprint = CategoryBlueprint {
    category: ProductCategory::Fragile,
    storage_instructions: "Handle with care, store on padded shelving, do not stack",
    min_reorder_point: 8,
    compliance_tags: &["handle-with-care"],
};

const BULK: CategoryBlueprint = CategoryBlueprint {
    category: ProductCategory::Bulk,
    storage_instructions: "Palletized storage, forklift access required",
    min_reorder_point: 20,
    compliance_tags: &["pallet"],
};

const HAZARDOUS: CategoryBlueprint = CategoryBlueprint {
    category: ProductCategory::Hazardous,
    storage_instructions: "Segregated hazmat area, ventilation and spill containment",
    min_reorder_point: 5,
    compliance_tags: &["haz-mat", "msds-required"],
};

pub fn blueprint_for(category: ProductCategory) -> &'static CategoryBlueprint {
    match category {
        ProductCategory::Standard => &STANDARD,
        ProductCategory::Perishable => &PERISHABLE,
        ProductCategory::Fragile => &FRAGILE,
        ProductCategory::Bulk => &BULK,
        ProductCategory::Hazardous => &HAZARDOUS,
    }
}

/// The requested reorder point, raised to the category floor when it falls below.
pub fn recommended_reorder_point(category: ProductCategory, requested: i32) -> i32 {
    requested.max(blueprint_for(category).min_reorder_point)
}

pub fn default_description(category: ProductCategory) -> &'static str {
    blueprint_for(category).storage_instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ProductCategory::Standard, 0, 5)]
    #[case(ProductCategory::Perishable, 3, 15)]
    #[case(ProductCategory::Fragile, 8, 8)]
    #[case(ProductCategory::Bulk, 0, 20)]
    #[case(ProductCategory::Hazardous, 2, 5)]
    fn reorder_floor_applies_when_requested_is_low(
        #[case] category: ProductCategory,
        #[case] requested: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(recommended_reorder_point(category, requested), expected);
    }

    #[test]
    fn requested_wins_above_the_floor() {
        assert_eq!(
            recommended_reorder_point(ProductCategory::Standard, 50),
            50
        );
    }

    #[test]
    fn hazardous_carries_compliance_tags() {
        let bp = blueprint_for(ProductCategory::Hazardous);
        assert!(bp.compliance_tags.contains(&"haz-mat"));
    }
}
