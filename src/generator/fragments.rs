//! Field-schema compiler: turns parsed fields into the code and markup fragments
//! that fill stub placeholders.
//!
//! Every fragment keeps input field order and keeps duplicates. An empty field list
//! always compiles to an empty string.

use serde::Serialize;

use crate::fields::FieldSpec;
use crate::naming::title_label;

/// Field types that take part in the search predicate
pub const SEARCHABLE_TYPES: &[&str] = &["string", "text", "email"];

const INPUT_CLASS: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-indigo-300 focus:ring focus:ring-indigo-200 focus:ring-opacity-50";

/// The fragment families the compiler can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Migration column declarations
    Schema,
    /// Model mass-assignment list
    Fillable,
    /// Form request validation rules
    Rules,
    /// Labelled inputs for the shared form partial
    FormFields,
    /// `<th>` cells for the index table
    TableHeaders,
    /// `<td>` cells for one index row
    TableBody,
    /// `<dt>/<dd>` pairs for the detail page
    ShowFields,
    /// OR-chained `like` query over textual fields
    SearchPredicate,
    /// Search form for the index page
    SearchInput,
}

impl FragmentKind {
    /// All kinds, in the order `crudgen plan` prints them
    pub const ALL: [FragmentKind; 9] = [
        FragmentKind::Schema,
        FragmentKind::Fillable,
        FragmentKind::Rules,
        FragmentKind::FormFields,
        FragmentKind::TableHeaders,
        FragmentKind::TableBody,
        FragmentKind::ShowFields,
        FragmentKind::SearchPredicate,
        FragmentKind::SearchInput,
    ];
}

/// Values the markup fragments interpolate besides the fields themselves
#[derive(Debug, Clone)]
pub struct FragmentContext {
    /// Blade variable holding the current record (`record` → `$record->title`)
    pub record_var: String,
    /// Route name base used by the search form action
    pub route_base: String,
}

impl FragmentContext {
    /// Context for a resource whose views receive `$record`
    pub fn new(route_base: impl Into<String>) -> Self {
        Self {
            record_var: "record".to_string(),
            route_base: route_base.into(),
        }
    }
}

/// Compile `fields` into the fragment for `kind`.
pub fn compile(fields: &[FieldSpec], kind: FragmentKind, ctx: &FragmentContext) -> String {
    match kind {
        FragmentKind::Schema => join(fields, schema_line, "\n            "),
        FragmentKind::Fillable => join(fields, |f| format!("'{}'", f.name), ",\n        "),
        FragmentKind::Rules => join(fields, rule_line, "\n            "),
        FragmentKind::FormFields => join(fields, |f| form_field(f, &ctx.record_var), "\n"),
        FragmentKind::TableHeaders => join(
            fields,
            |f| format!("<th class=\"py-3 px-6 text-left\">{}</th>", title_label(&f.name)),
            "\n                    ",
        ),
        FragmentKind::TableBody => join(
            fields,
            |f| {
                format!(
                    "<td class=\"py-3 px-6 text-left whitespace-nowrap\">{{{{ ${}->{} }}}}</td>",
                    ctx.record_var, f.name
                )
            },
            "\n                    ",
        ),
        FragmentKind::ShowFields => join(fields, |f| show_field(f, &ctx.record_var), "\n                "),
        FragmentKind::SearchPredicate => search_predicate(fields),
        FragmentKind::SearchInput => {
            if has_searchable(fields) {
                search_input(&ctx.route_base)
            } else {
                String::new()
            }
        }
    }
}

/// Whether any field would appear in the search predicate
pub fn has_searchable(fields: &[FieldSpec]) -> bool {
    fields.iter().any(|f| f.is_type(SEARCHABLE_TYPES))
}

/// Migration column method for a DSL type.
///
/// `email` and `password` only exist in the DSL; they are stored as strings. Anything
/// else is passed through to the schema builder verbatim.
pub fn storage_type(field_type: &str) -> &str {
    match field_type {
        "email" | "password" => "string",
        other => other,
    }
}

fn join(fields: &[FieldSpec], render: impl Fn(&FieldSpec) -> String, sep: &str) -> String {
    fields.iter().map(render).collect::<Vec<_>>().join(sep)
}

fn schema_line(field: &FieldSpec) -> String {
    let mut line = format!("$table->{}('{}')", storage_type(&field.field_type), field.name);
    if field.has_option("nullable") {
        line.push_str("->nullable()");
    }
    if field.has_option("unique") {
        line.push_str("->unique()");
    }
    // `default` is recognised but carries no value in the DSL, so nothing is emitted
    line.push(';');
    line
}

fn rule_line(field: &FieldSpec) -> String {
    let mut rules = vec![if field.has_option("nullable") { "nullable" } else { "required" }];
    match field.field_type.as_str() {
        "string" => rules.extend(["string", "max:255"]),
        "integer" => rules.push("integer"),
        "boolean" => rules.push("boolean"),
        "email" => rules.push("email"),
        "date" | "datetime" => rules.push("date"),
        _ => {}
    }
    // TODO: translate `unique` into `unique:{table},{column}` once the compiler receives the table name
    format!("'{}' => '{}',", field.name, rules.join("|"))
}

fn form_field(field: &FieldSpec, record_var: &str) -> String {
    let name = &field.name;
    let old = format!("old('{name}', ${record_var}->{name} ?? '')");
    let input = match field.field_type.as_str() {
        "text" | "longtext" => format!(
            "<textarea name=\"{name}\" id=\"{name}\" class=\"{INPUT_CLASS}\" rows=\"3\">{{{{ {old} }}}}</textarea>"
        ),
        "boolean" => format!(
            "<div class=\"flex items-center\">\n        <input type=\"checkbox\" name=\"{name}\" id=\"{name}\" value=\"1\" {{{{ old('{name}', ${record_var}->{name} ?? false) ? 'checked' : '' }}}} class=\"rounded border-gray-300 text-indigo-600 shadow-sm focus:border-indigo-300 focus:ring focus:ring-indigo-200 focus:ring-opacity-50\">\n        <span class=\"ml-2 text-sm text-gray-600\">Yes</span>\n    </div>"
        ),
        "date" | "datetime" => format!(
            "<input type=\"date\" name=\"{name}\" id=\"{name}\" value=\"{{{{ {old} }}}}\" class=\"{INPUT_CLASS}\">"
        ),
        other => {
            let input_type = match other {
                "email" => "email",
                "password" => "password",
                _ => "text",
            };
            format!(
                "<input type=\"{input_type}\" name=\"{name}\" id=\"{name}\" value=\"{{{{ {old} }}}}\" class=\"{INPUT_CLASS}\">"
            )
        }
    };
    format!(
        "<div class=\"mb-4\">\n    <label for=\"{name}\" class=\"block text-sm font-medium text-gray-700\">{label}</label>\n    {input}\n    @error('{name}')\n        <p class=\"text-red-500 text-xs mt-1\">{{{{ $message }}}}</p>\n    @enderror\n</div>",
        label = title_label(name),
    )
}

fn show_field(field: &FieldSpec, record_var: &str) -> String {
    format!(
        "<div class=\"col-span-1\">\n                    <dt class=\"text-sm font-medium text-gray-500\">{}</dt>\n                    <dd class=\"mt-1 text-sm text-gray-900\">{{{{ ${record_var}->{} }}}}</dd>\n                </div>",
        title_label(&field.name),
        field.name
    )
}

fn search_predicate(fields: &[FieldSpec]) -> String {
    let searchable: Vec<&FieldSpec> = fields.iter().filter(|f| f.is_type(SEARCHABLE_TYPES)).collect();
    if searchable.is_empty() {
        return String::new();
    }
    let mut code = String::from(
        "if ($search = $request->get('search')) {\n            $query->where(function ($q) use ($search) {",
    );
    for (i, field) in searchable.iter().enumerate() {
        if i == 0 {
            code.push_str(&format!("\n                $q->where('{}', 'like', \"%{{$search}}%\")", field.name));
        } else {
            code.push_str(&format!(
                "\n                  ->orWhere('{}', 'like', \"%{{$search}}%\")",
                field.name
            ));
        }
    }
    code.push_str(";\n            });\n        }");
    code
}

fn search_input(route_base: &str) -> String {
    format!(
        r#"<div class="mb-4">
        <form action="{{{{ route('{route_base}.index') }}}}" method="GET" class="flex gap-2">
            <input type="text" name="search" value="{{{{ request('search') }}}}" placeholder="Search..." class="rounded-md border-gray-300 shadow-sm focus:border-indigo-300 focus:ring focus:ring-indigo-200 focus:ring-opacity-50">
            <button type="submit" class="bg-gray-500 hover:bg-gray-700 text-white font-bold py-2 px-4 rounded">Search</button>
        </form>
    </div>"#
    )
}
