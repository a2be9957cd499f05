/// Static description of the services the gateway fronts: what to show in
/// list/detail pages and which inputs the create/edit forms carry. The set
/// is fixed; an unknown name is rejected before anything is forwarded.

pub struct FieldSpec {
    pub name: &'static str,
    pub input_type: &'static str,
    pub required: bool,
}

pub struct ServiceSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub fields: &'static [FieldSpec],
}

pub const SERVICES: &[ServiceSpec] = &[
    ServiceSpec {
        name: "users",
        title: "Users",
        columns: &["id", "name", "email"],
        fields: &[
            FieldSpec {
                name: "name",
                input_type: "text",
                required: true,
            },
            FieldSpec {
                name: "email",
                input_type: "email",
                required: true,
            },
        ],
    },
    ServiceSpec {
        name: "products",
        title: "Products",
        columns: &["id", "name", "description", "price"],
        fields: &[
            FieldSpec {
                name: "name",
                input_type: "text",
                required: true,
            },
            FieldSpec {
                name: "description",
                input_type: "text",
                required: false,
            },
            FieldSpec {
                name: "price",
                input_type: "number",
                required: true,
            },
        ],
    },
    ServiceSpec {
        name: "orders",
        title: "Orders",
        columns: &[
            "id",
            "user_id",
            "user_name",
            "product_id",
            "product_name",
            "created_at",
        ],
        fields: &[
            FieldSpec {
                name: "user_id",
                input_type: "number",
                required: true,
            },
            FieldSpec {
                name: "product_id",
                input_type: "number",
                required: true,
            },
        ],
    },
];

pub fn find(name: &str) -> Option<&'static ServiceSpec> {
    SERVICES.iter().find(|s| s.name == name)
}
