use quick_launcher::command::{
    default_result, gen_commands, simple_command, CommandDescriptor, CommandType, ItemSpec,
};
use quick_launcher::i18n::MessageCatalog;

fn catalog() -> MessageCatalog {
    let mut catalog = MessageCatalog::new("en");
    catalog.insert("demo_a_title", "Alpha");
    catalog.insert("demo_a_subtitle", "First command");
    catalog.insert("demo_b_title", "Wrong lookup");
    catalog.insert("demo_bee_title", "Bee");
    catalog.insert("demo_bee_subtitle", "Second command");
    catalog
}

#[test]
fn keyname_drives_message_lookup() {
    let items = [ItemSpec::new("a"), ItemSpec::new("b").keyname("bee")];
    let commands = gen_commands("demo", "icon.png", &items, CommandType::Keyword, &catalog());

    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].title, "Alpha");
    assert_eq!(commands[0].subtitle, "First command");
    assert_eq!(commands[1].key, "b");
    assert_eq!(commands[1].orkey, "b");
    assert_eq!(commands[1].title, "Bee");
    assert_eq!(commands[1].subtitle, "Second command");
}

#[test]
fn missing_messages_resolve_to_empty() {
    let items = [ItemSpec::new("zzz")];
    let commands = gen_commands("demo", "", &items, CommandType::Regexp, &catalog());
    assert_eq!(commands[0].title, "");
    assert_eq!(commands[0].subtitle, "");
    assert_eq!(commands[0].kind, CommandType::Regexp);
}

#[test]
fn flags_are_copied_and_editable_defaults_true() {
    let items = [
        ItemSpec::new("a")
            .allow_batch()
            .shift_key()
            .workflow(serde_json::json!({"steps": 2})),
        ItemSpec::new("b").editable(false),
        ItemSpec::new("c").editable(true),
    ];
    let commands = gen_commands("demo", "i.png", &items, CommandType::Keyword, &catalog());

    assert!(commands[0].allow_batch);
    assert!(commands[0].shift_key);
    assert_eq!(commands[0].workflow, Some(serde_json::json!({"steps": 2})));
    assert!(commands[0].editable);
    assert!(!commands[1].editable);
    assert!(!commands[1].allow_batch);
    assert!(commands[2].editable);
    assert!(commands.iter().all(|c| c.icon == "i.png"));
}

#[test]
fn duplicate_keys_are_passed_through() {
    let items = [ItemSpec::new("a"), ItemSpec::new("a")];
    let commands = gen_commands("demo", "", &items, CommandType::Keyword, &catalog());
    assert_eq!(commands.len(), 2);
}

#[test]
fn item_specs_deserialize_from_plugin_json() {
    let json = r#"[{"key": "a", "allowBatch": true}, {"key": "b", "keyname": "bee", "editable": false}]"#;
    let items: Vec<ItemSpec> = serde_json::from_str(json).unwrap();
    let commands = gen_commands("demo", "", &items, CommandType::Keyword, &catalog());
    assert!(commands[0].allow_batch);
    assert_eq!(commands[1].title, "Bee");
    assert!(!commands[1].editable);
}

#[test]
fn descriptor_json_defaults_editable() {
    let json = r#"{"key": "k", "orkey": "k", "type": "keyword", "title": "", "subtitle": "", "icon": ""}"#;
    let command: CommandDescriptor = serde_json::from_str(json).unwrap();
    assert!(command.editable);
    assert!(!command.allow_batch);
}

#[test]
fn key_override_keeps_original() {
    let items = [ItemSpec::new("tab")];
    let command = gen_commands("tabs", "", &items, CommandType::Keyword, &catalog())
        .remove(0)
        .with_key("t");
    assert_eq!(command.key, "t");
    assert_eq!(command.orkey, "tab");
    assert_eq!(command.simple(), simple_command("t", "tab"));
}

#[test]
fn default_result_mirrors_command() {
    let items = [ItemSpec::new("a")];
    let command = gen_commands("demo", "a.png", &items, CommandType::Keyword, &catalog()).remove(0);
    let rows = default_result(&command);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_default);
    assert_eq!(rows[0].key, "a");
    assert_eq!(rows[0].icon, "a.png");
    assert_eq!(rows[0].title, "Alpha");
    assert_eq!(rows[0].desc, "First command");
}
