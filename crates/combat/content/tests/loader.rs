use std::fs;
use std::path::Path;

use combat_content::ContentLoader;
use combat_core::{
    ConfigOracle, ParticipantSpec, ScriptedRng, SkillId, SpellInput, StatusId,
};

const SKILLS: &str = r#"(
    skills: [
        (id: 1, name: "Jab", execution: "jab", effects: [Damage((formula: Constant(9.0)))]),
    ],
)"#;

const EXECUTIONS: &str = r#"(
    executions: [
        (
            id: "jab",
            total_time_ms: 300,
            clips: [(start_ms: 100, end_ms: 150, kind: ActionEvent(AssignEffect(All)))],
        ),
    ],
)"#;

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).unwrap();
}

#[test]
fn minimal_directory_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "skills.ron", SKILLS);
    write(dir.path(), "executions.ron", EXECUTIONS);

    let bundle = ContentLoader::from_dir(dir.path()).load().unwrap();

    assert_eq!(bundle.catalog.skills().count(), 1);
    assert_eq!(bundle.catalog.statuses().count(), 0);
    assert_eq!(bundle.catalog.attack().effects.len(), 1);
    assert_eq!(bundle.config.attack_windup_ms, 0);
}

#[test]
fn directory_content_drives_a_world() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "skills.ron", SKILLS);
    write(dir.path(), "executions.ron", EXECUTIONS);
    write(dir.path(), "combat.toml", "attack_windup_ms = 50\n");

    let bundle = ContentLoader::from_dir(dir.path()).load().unwrap();
    assert_eq!(bundle.config.attack_windup_ms, 50);

    let mut world = bundle.into_world().with_rng(ScriptedRng::never());
    let boxer = world.spawn_participant(ParticipantSpec::new("boxer").with_skill(SkillId(1), 1));
    let dummy = world.spawn_participant(ParticipantSpec::new("dummy").with_health(30));

    world
        .spell_skill(boxer, SkillId(1), SpellInput::target(dummy))
        .unwrap()
        .unwrap();
    world.tick(300);

    assert_eq!(world.participant(dummy).unwrap().health.current(), 21);
}

#[test]
fn missing_required_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "skills.ron", SKILLS);

    let error = ContentLoader::from_dir(dir.path()).load().unwrap_err();

    assert!(format!("{error:#}").contains("executions.ron"));
}

#[test]
fn dangling_status_reference_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "skills.ron",
        r#"(skills: [(id: 1, name: "Hex", execution: "jab", effects: [AddStatus((status: 9))])])"#,
    );
    write(dir.path(), "executions.ron", EXECUTIONS);

    let error = ContentLoader::from_dir(dir.path()).load().unwrap_err();
    let message = format!("{error:#}");

    assert!(message.contains("content validation failed"));
    assert!(message.contains(&StatusId(9).to_string()));
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "skills.ron",
        r#"(skills: [
            (id: 1, name: "Jab", execution: "jab"),
            (id: 1, name: "Jab again", execution: "jab"),
        ])"#,
    );
    write(dir.path(), "executions.ron", EXECUTIONS);

    let error = ContentLoader::from_dir(dir.path()).load().unwrap_err();

    assert!(format!("{error:#}").contains("skills.ron"));
}

#[test]
fn malformed_ron_reports_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "skills.ron", "(skills: [(id: \"one\")])");
    write(dir.path(), "executions.ron", EXECUTIONS);

    let error = ContentLoader::from_dir(dir.path()).load().unwrap_err();

    assert!(format!("{error:#}").contains("skills.ron"));
}

#[test]
fn embedded_content_plays_every_skill() {
    let bundle = ContentLoader::embedded().load().unwrap();
    let skills: Vec<SkillId> = bundle.catalog.skills().map(|skill| skill.id).collect();
    let mut world = bundle.into_world();

    for skill in skills {
        let caster = world.spawn_participant(ParticipantSpec::new("caster").with_skill(skill, 1));
        let target = world.spawn_participant(ParticipantSpec::new("target"));
        let execution = world
            .spell_skill(caster, skill, SpellInput::target(target))
            .unwrap();
        assert!(execution.is_some(), "{skill} did not start");
    }
    for _ in 0..100 {
        world.tick(50);
        world.probe_contacts();
    }

    assert!(world.faults().is_empty(), "{:?}", world.faults());
    assert_eq!(world.executions().count(), 0);
    assert_eq!(world.hit_volumes().count(), 0);
}
