use crate::engine::status::{linear_stages, stage_index};
use crate::models::tracking::{EntityType, Progress};

// Statuses outside the linear list (unknown strings and shipment branch
// statuses alike) report step 1.
pub fn progress_for(raw: &str, entity: EntityType) -> Progress {
    let total_steps = linear_stages(entity).len();
    let current_step = stage_index(entity, raw).map_or(0, |idx| idx + 1).max(1);
    let percentage = (current_step as f64 / total_steps as f64 * 100.0).round() as u8;

    Progress {
        current_step,
        total_steps,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::progress_for;
    use crate::engine::status::{PACKAGE_STAGES, SHIPMENT_STAGES};
    use crate::models::tracking::EntityType;

    #[test]
    fn package_steps_follow_stage_order() {
        for (idx, stage) in PACKAGE_STAGES.iter().enumerate() {
            let progress = progress_for(stage, EntityType::Package);
            assert_eq!(progress.total_steps, 7);
            assert_eq!(progress.current_step, idx + 1);
        }
    }

    #[test]
    fn percentage_never_decreases_and_ends_at_100() {
        for (entity, stages) in [
            (EntityType::Package, &PACKAGE_STAGES[..]),
            (EntityType::Shipment, &SHIPMENT_STAGES[..]),
        ] {
            let percentages: Vec<u8> = stages
                .iter()
                .map(|stage| progress_for(stage, entity).percentage)
                .collect();

            assert!(percentages.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(percentages.last(), Some(&100));
        }
    }

    #[test]
    fn shipped_package_is_four_of_seven() {
        let progress = progress_for("shipped", EntityType::Package);
        assert_eq!(progress.current_step, 4);
        assert_eq!(progress.total_steps, 7);
        assert_eq!(progress.percentage, 57);
    }

    #[test]
    fn unrecognized_status_counts_as_first_step() {
        let progress = progress_for("misrouted", EntityType::Package);
        assert_eq!(progress.current_step, 1);
        assert_eq!(progress.percentage, 14);

        let branch = progress_for("returned", EntityType::Shipment);
        assert_eq!(branch.current_step, 1);
        assert_eq!(branch.total_steps, 9);
        assert_eq!(branch.percentage, 11);
    }
}
