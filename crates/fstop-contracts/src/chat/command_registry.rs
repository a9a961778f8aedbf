#[derive(Clone, Copy, Debug)]
pub(crate) struct CommandSpec {
    pub command: &'static str,
    pub action: &'static str,
    /// Key the raw argument is stored under.
    pub arg_key: &'static str,
}

/// Commands whose whole remainder is one free-text argument.
pub(crate) const RAW_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "preset",
        action: "apply_preset",
        arg_key: "query",
    },
    CommandSpec {
        command: "presets",
        action: "search_presets",
        arg_key: "term",
    },
    CommandSpec {
        command: "search",
        action: "search_presets",
        arg_key: "term",
    },
    CommandSpec {
        command: "save",
        action: "save_preset",
        arg_key: "name",
    },
    CommandSpec {
        command: "delete",
        action: "delete_preset",
        arg_key: "id",
    },
    CommandSpec {
        command: "model",
        action: "set_model",
        arg_key: "model",
    },
    CommandSpec {
        command: "ar",
        action: "set_aspect_ratio",
        arg_key: "ratio",
    },
    CommandSpec {
        command: "setup",
        action: "toggle_setup",
        arg_key: "setup",
    },
    CommandSpec {
        command: "genre",
        action: "set_genre",
        arg_key: "genre",
    },
    CommandSpec {
        command: "scene",
        action: "set_scene",
        arg_key: "scene",
    },
];

/// Commands taking a field name, optionally followed by a value.
pub(crate) const FIELD_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "set",
        action: "set_field",
        arg_key: "field",
    },
    CommandSpec {
        command: "lock",
        action: "lock",
        arg_key: "field",
    },
    CommandSpec {
        command: "unlock",
        action: "unlock",
        arg_key: "field",
    },
];

pub(crate) const NO_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "generate",
        action: "generate",
        arg_key: "",
    },
    CommandSpec {
        command: "random",
        action: "randomize",
        arg_key: "",
    },
    CommandSpec {
        command: "reset",
        action: "reset",
        arg_key: "",
    },
    CommandSpec {
        command: "show",
        action: "show",
        arg_key: "",
    },
    CommandSpec {
        command: "theme",
        action: "theme",
        arg_key: "",
    },
    CommandSpec {
        command: "history",
        action: "history",
        arg_key: "",
    },
    CommandSpec {
        command: "clear_history",
        action: "clear_history",
        arg_key: "",
    },
    CommandSpec {
        command: "models",
        action: "list_models",
        arg_key: "",
    },
    CommandSpec {
        command: "setups",
        action: "list_setups",
        arg_key: "",
    },
    CommandSpec {
        command: "help",
        action: "help",
        arg_key: "",
    },
    CommandSpec {
        command: "quit",
        action: "quit",
        arg_key: "",
    },
    CommandSpec {
        command: "exit",
        action: "quit",
        arg_key: "",
    },
];

pub(crate) const COPY_COMMAND: CommandSpec = CommandSpec {
    command: "copy",
    action: "copy",
    arg_key: "target",
};

pub(crate) const EXPORT_COMMAND: CommandSpec = CommandSpec {
    command: "export",
    action: "export",
    arg_key: "dir",
};

pub const CHAT_HELP_COMMANDS: &[&str] = &[
    "/scene <text>",
    "/set <field> <value>",
    "/genre <genre>",
    "/lock <camera|lens|lighting>",
    "/unlock <camera|lens|lighting>",
    "/setup <label|phrase>",
    "/setups",
    "/ar <ratio>",
    "/model <midjourney|flux|dalle>",
    "/models",
    "/preset <id|title>",
    "/presets [term]",
    "/random",
    "/reset",
    "/save <name>",
    "/delete <id>",
    "/generate",
    "/show",
    "/theme",
    "/history",
    "/clear_history",
    "/copy <main|cinematic|gritty|commercial|history N>",
    "/export [dir]",
    "/help",
    "/quit",
];
