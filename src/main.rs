use combtree::{build_bindings, BuildOptions, NodeKind, TypeExpr, TypeNode};

fn t(prim: &str) -> TypeExpr {
    TypeExpr::prim(prim)
}

fn app(prim: &str, args: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::with_args(prim, args)
}

/// Storage of a small token ledger with a pending-transfers queue
fn sample_storage() -> TypeExpr {
    let transfer = app(
        "pair",
        vec![
            t("address").annotated("%from"),
            t("address").annotated("%to"),
            t("nat").annotated("%amount"),
        ],
    );
    let allowance = app("pair", vec![t("address"), t("address")]);
    app(
        "pair",
        vec![
            app("big_map", vec![t("address"), t("nat")]).annotated("%ledger"),
            app("big_map", vec![allowance.clone(), t("nat")]).annotated("%allowances"),
            app("list", vec![transfer]).annotated("%pending"),
            app("option", vec![allowance]).annotated("%frozen"),
            t("timestamp").annotated("%updated"),
        ],
    )
}

fn describe(node: &TypeNode, ix: usize) {
    let name = node.name.as_deref().unwrap_or("<anonymous>");
    if let NodeKind::Struct(st) = &node.kind {
        println!("struct #{} {}", ix, name);
        for (field, path) in st.iter() {
            println!("    {:<12} {:<10} at {}", field.name, field.ty.tag().to_string(), path);
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let schema = match sample_storage().to_schema() {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("invalid storage type: {}", err);
            std::process::exit(1);
        }
    };
    match build_bindings(&schema, BuildOptions::default()) {
        Ok(bindings) => {
            for (ix, st) in bindings.structs.iter().enumerate() {
                describe(st, ix);
            }
        }
        Err(err) => {
            eprintln!("failed to build bindings: {}", err);
            std::process::exit(1);
        }
    }
}
