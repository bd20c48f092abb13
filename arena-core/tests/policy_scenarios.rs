use arena_core::{
    Action, Agent, ArenaLimits, Decision, Grid, Mode, Observation, Orientation, Policy,
    PolicyConfig, Vitals,
};

const LIMITS: ArenaLimits = ArenaLimits {
    max_health: 200,
    max_energy: 10,
};

fn policy() -> Policy {
    Policy::new(PolicyConfig::new(LIMITS)).expect("limits are positive")
}

// Enemy off the firing line, one battery in reach.
const ARENA: &str = "\
X__B__
______
______
___O__
______
______";

#[test]
fn collecting_raises_the_hunting_bar() {
    let grid = Grid::parse(ARENA).unwrap();
    // 50% energy: above MIN (25%) but below HYST (80%).
    let vitals = Vitals {
        health: 200,
        energy: 5,
    };

    let after_collect = policy().decide(&grid, Orientation::South, vitals, Some(Mode::Collect));
    assert_ne!(after_collect.mode, Mode::Hunt);
    assert_eq!(after_collect.mode, Mode::Collect);

    let after_hunt = policy().decide(&grid, Orientation::South, vitals, Some(Mode::Hunt));
    assert_eq!(after_hunt.mode, Mode::Hunt);

    let fresh = policy().decide(&grid, Orientation::South, vitals, None);
    assert_eq!(fresh.mode, Mode::Hunt);
}

#[test]
fn full_recharge_ends_collecting() {
    let grid = Grid::parse(ARENA).unwrap();
    let vitals = Vitals {
        health: 200,
        energy: 8,
    };
    let d = policy().decide(&grid, Orientation::South, vitals, Some(Mode::Collect));
    assert_eq!(d.mode, Mode::Hunt);
}

#[test]
fn low_health_avoids_the_enemy() {
    let grid = Grid::parse(ARENA).unwrap();
    let vitals = Vitals {
        health: 20,
        energy: 10,
    };
    let d = policy().decide(&grid, Orientation::South, vitals, None);
    assert_eq!(d.mode, Mode::Collect);
}

#[test]
fn hunt_falls_through_when_enemy_is_sealed_off() {
    let grid = Grid::parse(
        "\
X______
_____W_
____WOW
_____W_
_______
_______
_______",
    )
    .unwrap();
    // Refuge is (2+3, 5+3) wrapped to (5, 1), which is open ground.
    let weak = Vitals {
        health: 10,
        energy: 0,
    };
    let d = policy().decide(&grid, Orientation::East, weak, None);
    assert_eq!(d.mode, Mode::Cower);

    let healthy = Vitals {
        health: 200,
        energy: 10,
    };
    let d = policy().decide(&grid, Orientation::East, healthy, None);
    assert_eq!(d.mode, Mode::Cower);
}

#[test]
fn unreachable_everything_is_idle_not_an_error() {
    let grid = Grid::parse(
        "\
WWW___
WXW___
WWW___
______
______
_____O",
    )
    .unwrap();
    let healthy = Vitals {
        health: 200,
        energy: 10,
    };
    let d = policy().decide(&grid, Orientation::North, healthy, None);
    assert_eq!(
        d,
        Decision {
            action: Action::Noop,
            mode: Mode::Idle
        }
    );
}

#[test]
fn agent_carries_hysteresis_across_ticks() {
    let mut agent = Agent::new(policy());
    let tick = |energy: i32| Observation {
        status: "running".to_string(),
        health: 200,
        energy,
        orientation: Some(Orientation::South),
        grid: ARENA.to_string(),
    };

    // Low energy: collect.
    assert_eq!(agent.tick(&tick(2)).unwrap().mode, Mode::Collect);
    // Recovered to 50%, still collecting because of the previous mode.
    assert_eq!(agent.tick(&tick(5)).unwrap().mode, Mode::Collect);
    // 80% clears the raised bar.
    assert_eq!(agent.tick(&tick(8)).unwrap().mode, Mode::Hunt);
    // Back to 50%: the normal bar applies again.
    assert_eq!(agent.tick(&tick(5)).unwrap().mode, Mode::Hunt);
}
