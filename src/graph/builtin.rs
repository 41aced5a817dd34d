use super::definition::{NodeBehavior, NodeDefinition};
use super::port::{LogicPortDefinition as Port, PortChannel};
use super::registry::NodeDefinitionRegistry;
use tracing::warn;

/// Defines one constructor per built-in node type plus the function that
/// registers all of them. Ports without an explicit order are numbered by
/// position.
macro_rules! define_builtin_nodes {
    (
        $(
            $fn_name:ident => ($type_id:expr, $label:expr, $behavior:expr)
                ports [ $( $port:expr ),* $(,)? ]
                $( defaults { $( $key:expr => $value:expr ),* $(,)? } )?
        );* $(;)?
    ) => {
        $(
            pub fn $fn_name() -> NodeDefinition {
                let mut definition = NodeDefinition::new($type_id, $label, $behavior)
                    $( .with_port($port) )*;
                $( $( definition = definition.with_default($key, $value); )* )?
                for (index, port) in definition.ports.iter_mut().enumerate() {
                    port.order.get_or_insert(index as u32);
                }
                definition
            }
        )*

        pub(super) fn register_builtin_nodes(registry: &mut NodeDefinitionRegistry) {
            $(
                if let Err(err) = registry.register($fn_name()) {
                    warn!(error = %err, "skipping built-in node type");
                }
            )*
        }
    };
}

define_builtin_nodes! {
    start_node => ("start", "Start", NodeBehavior::Start)
        ports [
            Port::output("next", "Next", PortChannel::Flow),
        ];

    if_node => ("if", "If", NodeBehavior::If)
        ports [
            Port::input("in", "In", PortChannel::Flow),
            Port::input("condition", "Condition", PortChannel::Data).with_value_type("boolean"),
            Port::branch("true", "True"),
            Port::branch("false", "False"),
        ];

    assign_node => ("assign", "Assign", NodeBehavior::Assign)
        ports [
            Port::input("in", "In", PortChannel::Flow),
            Port::input("value", "Value", PortChannel::Data).with_value_type("any"),
            Port::output("next", "Next", PortChannel::Flow),
        ]
        defaults { "variable" => "" };

    add_node => ("add", "Add", NodeBehavior::Add)
        ports [
            Port::input("a", "A", PortChannel::Data).with_value_type("number"),
            Port::input("b", "B", PortChannel::Data).with_value_type("number"),
            Port::output("result", "Result", PortChannel::Data).with_value_type("number"),
        ];

    return_node => ("return", "Return", NodeBehavior::Return)
        ports [
            Port::input("in", "In", PortChannel::Flow),
            Port::input("value", "Value", PortChannel::Data).with_value_type("any"),
        ];

    loop_node => ("loop", "Loop", NodeBehavior::Loop)
        ports [
            Port::input("in", "In", PortChannel::Flow),
            Port::input("items", "Items", PortChannel::Data).with_value_type("array"),
            Port::body("body", "Body"),
            Port::output("next", "Next", PortChannel::Flow),
        ]
        defaults { "itemName" => "item" };
}
