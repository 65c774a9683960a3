#[cfg(test)]
mod solver_tests {
    use jiff::{SignedDuration, Timestamp};

    use crate::{
        models::{Difficulty, Ingredient, IngredientKind, Recipe, RecipeTree, ResolvedStep, Step},
        solver::{
            bulk_liquid_temperatures, required_temperature, schedule_starts, span,
            total_duration, CriticalPath, Scheduler,
        },
    };

    fn t0() -> Timestamp {
        "2026-10-17T06:00:00Z".parse().unwrap()
    }

    fn mins(m: i64) -> SignedDuration {
        SignedDuration::from_mins(m)
    }

    fn step(id: u64, minutes: i64) -> Step {
        Step {
            id,
            recipe_id: 1,
            super_step_id: None,
            name: format!("Step {id}"),
            duration: mins(minutes),
            temperature: 24,
            is_dynamic_temperature: false,
            second_temperature: 24,
            notes: String::new(),
            order: 0,
            ingredients: Vec::new(),
            substep_ids: Vec::new(),
            created_at: t0(),
            updated_at: t0(),
        }
    }

    fn leaf(id: u64, minutes: i64) -> ResolvedStep {
        ResolvedStep::leaf(step(id, minutes))
    }

    fn node(id: u64, minutes: i64, substeps: Vec<ResolvedStep>) -> ResolvedStep {
        ResolvedStep::with_substeps(step(id, minutes), substeps)
    }

    fn ingredient(id: u64, amount: f64, kind: IngredientKind) -> Ingredient {
        Ingredient {
            id,
            step_id: 1,
            name: format!("Ingredient {id}"),
            amount,
            kind,
            order: 0,
        }
    }

    fn mixing_step(target: i32, ingredients: Vec<Ingredient>) -> ResolvedStep {
        let mut s = step(1, 10);
        s.temperature = target;
        s.second_temperature = target;
        s.ingredients = ingredients;
        ResolvedStep::leaf(s)
    }

    #[test]
    fn test_critical_substep_first_others_end_together() {
        let parent = node(1, 20, vec![leaf(2, 10), leaf(3, 4)]);
        let schedule = schedule_starts(&[parent], t0(), false, CriticalPath::Longest);

        assert_eq!(schedule.start_of(2), Some(t0()));
        assert_eq!(schedule.start_of(3), Some(t0() + mins(6)));
        assert_eq!(schedule.start_of(1), Some(t0() + mins(10)));
        assert_eq!(schedule.end, t0() + mins(30));
    }

    #[test]
    fn test_roots_run_sequentially() {
        let roots = vec![leaf(1, 5), leaf(2, 3)];
        let schedule = schedule_starts(&roots, t0(), false, CriticalPath::Longest);

        assert_eq!(schedule.start, t0());
        assert_eq!(schedule.start_of(1), Some(t0()));
        assert_eq!(schedule.start_of(2), Some(t0() + mins(5)));
        assert_eq!(schedule.end, t0() + mins(8));
        assert_eq!(schedule.total_duration, mins(8));
    }

    #[test]
    fn test_inverted_anchor_is_the_end() {
        let roots = vec![leaf(1, 5), leaf(2, 3)];
        let schedule = schedule_starts(&roots, t0(), true, CriticalPath::Longest);

        assert_eq!(schedule.start, t0() - mins(8));
        assert_eq!(schedule.start_of(1), Some(t0() - mins(8)));
        assert_eq!(schedule.start_of(2), Some(t0() - mins(3)));
        assert_eq!(schedule.end, t0());
    }

    #[test]
    fn test_inverted_schedule_includes_substep_time() {
        let roots = vec![node(1, 30, vec![leaf(2, 60)]), leaf(3, 10)];
        let schedule = schedule_starts(&roots, t0(), true, CriticalPath::Longest);

        assert_eq!(schedule.total_duration, mins(100));
        assert_eq!(schedule.start_of(2), Some(t0() - mins(100)));
        assert_eq!(schedule.start_of(1), Some(t0() - mins(40)));
        assert_eq!(schedule.start_of(3), Some(t0() - mins(10)));
    }

    #[test]
    fn test_schedule_is_idempotent() {
        let roots = vec![
            node(1, 20, vec![leaf(2, 10), node(3, 4, vec![leaf(4, 2)])]),
            leaf(5, 7),
        ];
        let first = schedule_starts(&roots, t0(), true, CriticalPath::Longest);
        let second = schedule_starts(&roots, t0(), true, CriticalPath::Longest);
        assert_eq!(first, second);
        assert_eq!(first.starts.len(), 5);
    }

    #[test]
    fn test_policies_differ_on_out_of_order_substeps() {
        let roots = vec![node(1, 20, vec![leaf(2, 4), leaf(3, 10)])];

        let longest = schedule_starts(&roots, t0(), false, CriticalPath::Longest);
        assert_eq!(longest.start_of(3), Some(t0()));
        assert_eq!(longest.start_of(2), Some(t0() + mins(6)));
        assert_eq!(longest.start_of(1), Some(t0() + mins(10)));

        let first = schedule_starts(&roots, t0(), false, CriticalPath::FirstInOrder);
        assert_eq!(first.start_of(2), Some(t0()));
        assert_eq!(first.start_of(3), Some(t0() - mins(6)));
        assert_eq!(first.start_of(1), Some(t0() + mins(4)));
        assert_eq!(first.total_duration, mins(24));
    }

    #[test]
    fn test_longest_policy_keeps_first_on_ties() {
        let substeps = vec![leaf(2, 10), leaf(3, 10)];
        assert_eq!(CriticalPath::Longest.pick(&substeps), Some(0));
        assert_eq!(CriticalPath::Longest.pick(&[]), None);
    }

    #[test]
    fn test_nested_critical_branch() {
        let parent = node(1, 15, vec![node(2, 10, vec![leaf(4, 5)]), leaf(3, 3)]);
        assert_eq!(span(&parent, CriticalPath::Longest), mins(30));

        let schedule = schedule_starts(&[parent], t0(), false, CriticalPath::Longest);
        assert_eq!(schedule.start_of(4), Some(t0()));
        assert_eq!(schedule.start_of(2), Some(t0() + mins(5)));
        assert_eq!(schedule.start_of(3), Some(t0() + mins(12)));
        assert_eq!(schedule.start_of(1), Some(t0() + mins(15)));
    }

    #[test]
    fn test_nested_non_critical_branch_ends_with_critical() {
        let parent = node(1, 15, vec![leaf(2, 10), node(3, 2, vec![leaf(4, 4)])]);
        let schedule = schedule_starts(&[parent], t0(), false, CriticalPath::Longest);

        assert_eq!(schedule.start_of(2), Some(t0()));
        assert_eq!(schedule.start_of(4), Some(t0() + mins(4)));
        assert_eq!(schedule.start_of(3), Some(t0() + mins(8)));
        assert_eq!(schedule.start_of(1), Some(t0() + mins(10)));
    }

    #[test]
    fn test_end_of_step() {
        let roots = vec![leaf(1, 5)];
        let schedule = schedule_starts(&roots, t0(), false, CriticalPath::Longest);
        assert_eq!(schedule.end_of(&roots[0]), Some(t0() + mins(5)));
    }

    #[test]
    fn test_total_duration_sums_root_spans() {
        let roots = vec![node(1, 10, vec![leaf(2, 5)]), leaf(3, 1)];
        assert_eq!(total_duration(&roots, CriticalPath::Longest), mins(16));
    }

    #[test]
    fn test_schedule_saturates_at_timestamp_range() {
        let roots = vec![leaf(1, 60)];
        let schedule = schedule_starts(&roots, Timestamp::MIN, true, CriticalPath::Longest);
        assert_eq!(schedule.start, Timestamp::MIN);

        let schedule = schedule_starts(&roots, Timestamp::MAX, false, CriticalPath::Longest);
        assert_eq!(schedule.end, Timestamp::MAX);
    }

    #[test]
    fn test_scheduler_uses_recipe_anchor() {
        let mut root = step(1, 30);
        root.substep_ids = vec![2];
        let mut sub = step(2, 60);
        sub.super_step_id = Some(1);
        let recipe = Recipe {
            id: 1,
            name: "Bread".to_string(),
            info: String::new(),
            is_favorite: false,
            difficulty: Difficulty::Easy,
            inverted: true,
            times: None,
            date: t0(),
            image_data: None,
            order: 0,
            created_at: t0(),
            updated_at: t0(),
            steps: vec![root, sub],
        };
        let tree = RecipeTree::resolve(recipe).unwrap();

        let schedule = Scheduler::default().schedule(&tree);
        assert_eq!(schedule.end, t0());
        assert_eq!(schedule.start_of(2), Some(t0() - mins(90)));
        assert_eq!(Scheduler::new(CriticalPath::FirstInOrder).policy(), CriticalPath::FirstInOrder);
    }

    #[test]
    fn test_critical_path_parsing() {
        assert_eq!("Longest".parse::<CriticalPath>(), Ok(CriticalPath::Longest));
        assert_eq!("first-in-order".parse::<CriticalPath>(), Ok(CriticalPath::FirstInOrder));
        assert_eq!("first".parse::<CriticalPath>(), Ok(CriticalPath::FirstInOrder));
        assert!("shortest".parse::<CriticalPath>().is_err());
        assert_eq!(CriticalPath::FirstInOrder.to_string(), "first");
    }

    #[test]
    fn test_temperature_balance() {
        let water = ingredient(2, 300.0, IngredientKind::BulkLiquid);
        let s = mixing_step(
            24,
            vec![ingredient(1, 500.0, IngredientKind::Flour), water.clone()],
        );
        assert_eq!(required_temperature(&s, &water, 20), 30);
    }

    #[test]
    fn test_zero_mass_bulk_liquid() {
        let water = ingredient(2, 0.0, IngredientKind::BulkLiquid);
        let s = mixing_step(
            24,
            vec![ingredient(1, 500.0, IngredientKind::Flour), water.clone()],
        );
        assert_eq!(required_temperature(&s, &water, 20), 0);
    }

    #[test]
    fn test_temperature_truncates_toward_zero() {
        let water = ingredient(2, 300.0, IngredientKind::BulkLiquid);
        let s = mixing_step(
            10,
            vec![ingredient(1, 500.0, IngredientKind::Flour), water.clone()],
        );
        // (10 × 800 − 500 × 20) / 300 = −6.67
        assert_eq!(required_temperature(&s, &water, 20), -6);
    }

    #[test]
    fn test_substep_counts_at_its_end_temperature() {
        let water = ingredient(2, 200.0, IngredientKind::BulkLiquid);
        let mut levain = step(3, 60);
        levain.temperature = 24;
        levain.second_temperature = 28;
        levain.ingredients = vec![
            ingredient(4, 100.0, IngredientKind::Flour),
            ingredient(5, 100.0, IngredientKind::BulkLiquid),
        ];

        let mut dough = step(1, 10);
        dough.temperature = 26;
        dough.ingredients = vec![ingredient(1, 400.0, IngredientKind::Flour), water.clone()];

        let fixed =
            ResolvedStep::with_substeps(dough.clone(), vec![ResolvedStep::leaf(levain.clone())]);
        assert_eq!(required_temperature(&fixed, &water, 20), 40);

        levain.is_dynamic_temperature = true;
        let dynamic = ResolvedStep::with_substeps(dough, vec![ResolvedStep::leaf(levain)]);
        assert_eq!(required_temperature(&dynamic, &water, 20), 36);
    }

    #[test]
    fn test_substep_mass_includes_nested_substeps() {
        let water = ingredient(2, 100.0, IngredientKind::BulkLiquid);
        let mut inner = step(4, 10);
        inner.temperature = 20;
        inner.ingredients = vec![ingredient(6, 100.0, IngredientKind::Other)];
        let mut outer = step(3, 10);
        outer.temperature = 20;
        outer.ingredients = vec![ingredient(5, 100.0, IngredientKind::Flour)];
        let mut dough = step(1, 10);
        dough.temperature = 20;
        dough.ingredients = vec![water.clone()];

        let tree = ResolvedStep::with_substeps(
            dough,
            vec![ResolvedStep::with_substeps(outer, vec![ResolvedStep::leaf(inner)])],
        );
        // everything else sits at 20 °C already, so the water must too
        assert_eq!(required_temperature(&tree, &water, 20), 20);
    }

    #[test]
    fn test_bulk_liquid_temperatures_in_ingredient_order() {
        let s = mixing_step(
            24,
            vec![
                ingredient(7, 300.0, IngredientKind::BulkLiquid),
                ingredient(1, 500.0, IngredientKind::Flour),
                ingredient(9, 0.0, IngredientKind::BulkLiquid),
            ],
        );
        let temperatures = bulk_liquid_temperatures(&s, 20);
        assert_eq!(temperatures, vec![(7, 30), (9, 0)]);
    }
}
