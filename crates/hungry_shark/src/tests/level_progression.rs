//! Level completion, game over, reset and failed level setup

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::catalog::SmallFishType;
use crate::game::{GameError, GameMode};
use crate::level::{LevelError, PrototypeTable};
use crate::scene::SceneWorld;

fn eat_all(game: &mut GameplayController<LevelCatalog>) -> usize {
    let handles = active_handles(game);
    handles.into_iter().filter(|fish| game.on_fish_eaten(*fish)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaching_target_completes_level() {
        let mut game = controller();
        game.on_level_start(1).unwrap();
        run_for(&mut game, 1.0);

        let fish = active_handles(&game);
        assert!(game.on_fish_eaten(fish[0]));
        assert_eq!(game.mode(), GameMode::GameStart);
        assert!(game.on_fish_eaten(fish[1]));

        assert_eq!(game.mode(), GameMode::LevelComplete);
        assert_eq!(game.coins(), 25);
        assert_eq!(game.pool().categories().count(), 0);
        assert_eq!(game.pool().outstanding(), 0);
        assert!(game.scene().is_empty());
        assert!(!game.on_fish_eaten(fish[2]));

        run_for(&mut game, 1.0);
        assert_eq!(game.mode(), GameMode::GameStart);
        assert_eq!(game.level(), 2);
        assert_eq!(game.eaten(), 0);
        assert_eq!(game.target(), 3);
        assert_eq!(game.pool().capacity(&SmallFishType::ChelmonRostratus), 3);
        assert!(!game.pool().is_tracked(&SmallFishType::GoldenSmallFish));
        assert_eq!(game.scene().len(), 3);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::LevelCompleted { level: 1, coins: 25 }));
        assert!(events.contains(&GameEvent::LevelStarted { level: 2, target: 3 }));
    }

    #[test]
    fn test_last_level_returns_to_mission_mode() {
        let mut game = controller();
        game.on_level_start(2).unwrap();
        run_for(&mut game, 1.0);

        assert_eq!(eat_all(&mut game), 3);
        assert_eq!(game.mode(), GameMode::LevelComplete);

        run_for(&mut game, 1.0);
        assert_eq!(game.mode(), GameMode::MissionMode);
        assert_eq!(game.coins(), 40);
        assert!(game.drain_events().contains(&GameEvent::AllLevelsComplete));
    }

    #[test]
    fn test_time_limit_ends_level() {
        let mut game = controller();
        game.on_level_start(2).unwrap();

        run_for(&mut game, 4.75);
        assert_eq!(game.mode(), GameMode::GameStart);
        run_for(&mut game, 0.25);
        assert_eq!(game.mode(), GameMode::GameOver);

        run_for(&mut game, 1.0);
        assert!(game.drain_events().contains(&GameEvent::GameOverShown { level: 2 }));
        assert_eq!(game.scene().active_count(), 0);
    }

    #[test]
    fn test_bomb_hit_is_game_over() {
        let mut game = controller();
        game.on_level_start(1).unwrap();
        run_for(&mut game, 1.0);

        game.on_bomb_hit();
        assert_eq!(game.mode(), GameMode::GameOver);
        game.set_game_over();
        game.on_bomb_hit();

        run_for(&mut game, 1.0);
        let events = game.drain_events();
        assert_eq!(count_events(&events, |e| matches!(e, GameEvent::GameOverShown { .. })), 1);
        assert_eq!(game.pool().outstanding(), 0);

        // A finished game can start over
        game.on_level_start(1).unwrap();
        assert_eq!(game.mode(), GameMode::GameStart);
    }

    #[test]
    fn test_eating_after_game_over_is_ignored() {
        let mut game = controller();
        game.on_level_start(1).unwrap();
        run_for(&mut game, 1.0);
        let fish = active_handles(&game)[0];

        game.set_game_over();
        assert!(!game.on_fish_eaten(fish));
        assert_eq!(game.eaten(), 0);
    }

    #[test]
    fn test_level_end_releases_before_clear() {
        let mut game = controller();
        game.on_level_start(1).unwrap();
        run_for(&mut game, 1.0);
        game.on_fish_eaten(active_handles(&game)[0]);

        let report = game.on_level_end();
        assert_eq!(report.outstanding, 0);
        assert_eq!(report.discarded, 7);
        assert_eq!(report.categories, 2);
        assert!(game.scene().is_empty());

        // The eaten fish's delayed release was dropped with the level
        run_for(&mut game, 1.0);
        assert_eq!(game.pool().stats().ignored_releases, 0);
    }

    #[test]
    fn test_reset_game() {
        let mut game = controller();
        game.on_level_start(2).unwrap();
        run_for(&mut game, 1.0);
        game.on_fish_eaten(active_handles(&game)[0]);

        game.reset_game();
        assert_eq!(game.mode(), GameMode::None);
        assert_eq!(game.level(), 1);
        assert_eq!(game.eaten(), 0);
        assert_eq!(game.scene().active_count(), 0);
        assert_eq!(game.pool().categories().count(), 0);

        run_for(&mut game, 10.0);
        assert_eq!(game.mode(), GameMode::None);

        game.on_level_start(game.level()).unwrap();
        assert_eq!(game.pool().capacity(&SmallFishType::GoldenSmallFish), 4);
    }

    #[test]
    fn test_start_while_running_is_rejected() {
        let mut game = controller();
        game.on_level_start(1).unwrap();

        assert!(matches!(game.on_level_start(2), Err(GameError::LevelInProgress(1))));
        assert_eq!(game.level(), 1);
        assert!(game.pool().is_tracked(&SmallFishType::GoldenSmallFish));
    }

    #[test]
    fn test_level_file_with_gap_is_rejected() {
        let gapped = LEVELS.replace("\"levelNumber\": 2", "\"levelNumber\": 3");
        assert!(matches!(LevelCatalog::from_json(&gapped), Err(LevelError::MissingLevel(2))));
    }

    #[test]
    fn test_completing_every_level_never_stalls() {
        let mut game = controller();
        game.on_level_start(1).unwrap();

        for level in 1..=2 {
            run_for(&mut game, 1.0);
            assert_eq!(game.level(), level);
            while game.mode() == GameMode::GameStart {
                eat_all(&mut game);
                run_for(&mut game, 0.25);
            }
            assert_eq!(game.mode(), GameMode::LevelComplete);
            run_for(&mut game, 1.0);
        }
        assert_eq!(game.mode(), GameMode::MissionMode);
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let mut game = controller();

        assert!(matches!(
            game.on_level_start(9),
            Err(GameError::Level(LevelError::UnknownLevel(9)))
        ));
        assert_eq!(game.mode(), GameMode::None);
    }

    #[test]
    fn test_failed_pool_setup_leaves_mode_unchanged() {
        let mut scene = SceneWorld::new();
        let prototypes: PrototypeTable = SmallFishType::ALL
            .iter()
            .map(|fish| (*fish, scene.register_prototype(fish.name())))
            .collect();
        scene.remove_prototype(prototypes[&SmallFishType::CoralBeauty]);

        let levels = LevelCatalog::from_json(LEVELS).unwrap();
        let mut game =
            GameplayController::from_parts(levels, settings(), scene, prototypes, StdRng::seed_from_u64(1));

        let err = game.on_level_start(1).unwrap_err();
        assert!(matches!(err, GameError::Pool(_)));
        assert_eq!(game.mode(), GameMode::None);
        assert_eq!(game.pool().categories().count(), 0);
        assert!(game.scene().is_empty());

        run_for(&mut game, 2.0);
        assert_eq!(game.scene().active_count(), 0);
    }
}
