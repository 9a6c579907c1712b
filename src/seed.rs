use crate::types::{FeatureRequest, PrioritizedFeature, RadarData, ResourceUtilization};

pub const TEMPLATE_LEN: usize = 3;

pub fn seed_feature_requests() -> Vec<FeatureRequest> {
    vec![
        FeatureRequest::new(
            1,
            "Introduce Optional Dark Mode",
            "Introduce an optional dark mode in the mobile app to reduce eye strain during night-time use.",
        ),
        FeatureRequest::new(
            2,
            "Allow Customers Checkout",
            "Allow customers to checkout without creating an account.",
        ),
        FeatureRequest::new(
            31,
            "Show Prices",
            "Show prices in the user's local currency and support popular local payment methods.",
        ),
        FeatureRequest::new(
            32,
            "Implement Product Comparison",
            "Implement a product comparison feature where users can select multiple products and see their specifications side by side.",
        ),
        FeatureRequest::new(
            30,
            "Improve App Performance",
            "Optimize the mobile application for faster loading times and smoother scrolling. Improving app performance, especially for users on older devices or slower networks, would decrease bounce rates and enhance user satisfaction.",
        ),
        FeatureRequest::new(
            35,
            "Enable Pre Order",
            "Enable a pre-order option for popular items that are currently out of stock, allowing customers to reserve the product to be delivered once it's available again.",
        ),
        FeatureRequest::new(
            36,
            "Allow Users Follow",
            "Allow users to follow their favorite brands or sellers on the platform and receive notifications or a feed of new product releases or deals from those brands.",
        ),
        FeatureRequest::new(
            37,
            "Allow Mobile App",
            "Allow the mobile app to cache key pages or the user's wishlist/cart for offline access.",
        ),
        FeatureRequest::new(
            38,
            "Integrate Buy Now",
            "Integrate a Buy Now, Pay Later (BNPL) payment option at checkout.",
        ),
        FeatureRequest::new(
            39,
            "Introduce Gamified Badge",
            "Introduce a gamified badge system where users earn badges or titles for achieving certain milestones.",
        ),
        FeatureRequest::new(
            40,
            "Add Feature Product",
            "Add a feature on product pages where customers can provide feedback on how an item fits.",
        ),
        FeatureRequest::new(
            44,
            "Offer Personalized Shopping Assistant",
            "Offer a personalized shopping assistant via chat that helps users find products based on their preferences.",
        ),
    ]
}

pub fn placeholder_template() -> [PrioritizedFeature; TEMPLATE_LEN] {
    [
        PrioritizedFeature {
            title: "Introducing an optional dark mode".to_string(),
            description: "Introducing an optional dark mode".to_string(),
            composite_score: 8.0,
            cost_efficiency: 9.0,
            user_satisfaction: 9.0,
            dev_complexity: 3.0,
            justification: "The idea of introducing an optional dark mode is feasible within the given constraints and has potential benefits. It aligns well with user experience goals, especially for nighttime use, and can help reduce eye strain. The engineering hours required are likely to fall within the available range, and it does not seem overly resource-intensive.".to_string(),
            resource_utilization: ResourceUtilization {
                total_budget: 100.0,
                locked_budget: 30.0,
                feature_budget: 10.0,
            },
            radar_data: RadarData {
                relative_score: 8.0,
                value_created: 7.0,
                overall_roi: 9.0,
                business_impact: 6.0,
                user_demand: 9.0,
            },
        },
        PrioritizedFeature {
            title: "Implementing a product comparison feature".to_string(),
            description: "Implementing a product comparison feature".to_string(),
            composite_score: 8.0,
            cost_efficiency: 7.0,
            user_satisfaction: 8.0,
            dev_complexity: 6.0,
            justification: "The product comparison feature has significant potential for improving user experience and driving revenue uplift, especially in an e-commerce context where informed decisions are crucial. Given the available engineering hours and budget constraints, it is feasible but tight. The estimated impact on retention could be substantial if implemented well, aligning closely with strategic business goals.".to_string(),
            resource_utilization: ResourceUtilization {
                total_budget: 100.0,
                locked_budget: 40.0,
                feature_budget: 20.0,
            },
            radar_data: RadarData {
                relative_score: 8.0,
                value_created: 9.0,
                overall_roi: 8.0,
                business_impact: 8.0,
                user_demand: 7.0,
            },
        },
        PrioritizedFeature {
            title: "Improving localization support".to_string(),
            description: "Improving localization support".to_string(),
            composite_score: 8.0,
            cost_efficiency: 8.0,
            user_satisfaction: 8.0,
            dev_complexity: 5.0,
            justification: "The idea has strong potential to improve customer experience by addressing localization needs. It aligns well with user constraints regarding engineering hours, budget, and timeline. However, there are uncertainties around implementation risk, such as cross-team dependencies and integration challenges, which could affect the final score.".to_string(),
            resource_utilization: ResourceUtilization {
                total_budget: 100.0,
                locked_budget: 35.0,
                feature_budget: 15.0,
            },
            radar_data: RadarData {
                relative_score: 7.0,
                value_created: 8.0,
                overall_roi: 7.0,
                business_impact: 7.0,
                user_demand: 8.0,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::seed::{placeholder_template, seed_feature_requests};

    #[test]
    fn seeds_twelve_distinct_requests() {
        let seed = seed_feature_requests();
        assert_eq!(seed.len(), 12);
        let ids = seed.iter().map(|r| r.id).collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), 12);
        assert_eq!(seed[0].id, 1);
    }

    #[test]
    fn template_entries_have_distinct_titles() {
        let template = placeholder_template();
        let titles = template.iter().map(|t| t.title.clone()).collect::<BTreeSet<_>>();
        assert_eq!(titles.len(), template.len());
        for entry in &template {
            assert_eq!(entry.title, entry.description);
        }
    }
}
