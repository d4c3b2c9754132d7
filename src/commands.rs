//! Tool-name to listener-command-type registry.
//!
//! Tool names and listener command types diverge for several tools
//! (`batch_spawn` runs as `actor.batch_spawn`), so the mapping is an
//! explicit table rather than a naming convention. The redo path is the
//! only consumer: it reconstructs a listener command from a recorded
//! operation's tool name. A tool missing from this table cannot be redone
//! (it can still be undone if it captured undo data).

/// Exhaustive mapping from tool name to listener command type.
const COMMAND_TYPES: &[(&str, &str)] = &[
    ("actor_spawn", "actor.spawn"),
    ("actor_delete", "actor.delete"),
    ("actor_modify", "actor.modify"),
    ("actor_duplicate", "actor.duplicate"),
    ("actor_organize", "actor.organize"),
    ("batch_spawn", "actor.batch_spawn"),
    ("placement_validate", "actor.placement_validate"),
    ("actor_snap_to_socket", "actor.snap_to_socket"),
    ("material_apply", "material.apply"),
    ("material_create", "material.create"),
    ("material_list", "material.list"),
    ("material_info", "material.info"),
    ("blueprint_create", "blueprint.create"),
    ("blueprint_get_info", "blueprint.get_info"),
];

/// Resolve the listener command type for a tool name.
pub fn command_type(tool_name: &str) -> Option<&'static str> {
    COMMAND_TYPES
        .iter()
        .find(|(tool, _)| *tool == tool_name)
        .map(|(_, command)| *command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_tools_map_to_actor_namespace() {
        assert_eq!(command_type("actor_spawn"), Some("actor.spawn"));
        assert_eq!(command_type("actor_delete"), Some("actor.delete"));
        assert_eq!(command_type("actor_modify"), Some("actor.modify"));
        assert_eq!(command_type("actor_duplicate"), Some("actor.duplicate"));
        assert_eq!(command_type("actor_organize"), Some("actor.organize"));
        assert_eq!(
            command_type("actor_snap_to_socket"),
            Some("actor.snap_to_socket")
        );
    }

    #[test]
    fn diverging_names_are_mapped_explicitly() {
        // These are the entries a naming convention would get wrong.
        assert_eq!(command_type("batch_spawn"), Some("actor.batch_spawn"));
        assert_eq!(
            command_type("placement_validate"),
            Some("actor.placement_validate")
        );
    }

    #[test]
    fn material_and_blueprint_tools_are_mapped() {
        assert_eq!(command_type("material_apply"), Some("material.apply"));
        assert_eq!(command_type("material_create"), Some("material.create"));
        assert_eq!(command_type("material_list"), Some("material.list"));
        assert_eq!(command_type("material_info"), Some("material.info"));
        assert_eq!(command_type("blueprint_create"), Some("blueprint.create"));
        assert_eq!(
            command_type("blueprint_get_info"),
            Some("blueprint.get_info")
        );
    }

    #[test]
    fn unknown_tool_returns_none() {
        assert_eq!(command_type("custom_one_off"), None);
        assert_eq!(command_type(""), None);
    }

    #[test]
    fn command_types_are_dotted_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for (tool, command) in COMMAND_TYPES {
            assert!(
                command.split('.').count() == 2,
                "{command} is not <namespace>.<verb>"
            );
            assert!(seen.insert(*tool), "duplicate tool name {tool}");
        }
    }
}
