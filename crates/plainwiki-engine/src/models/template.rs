/// The named templates the external renderer is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Edit,
    View,
    List,
}

impl TemplateName {
    pub const ALL: [TemplateName; 3] = [TemplateName::Edit, TemplateName::View, TemplateName::List];

    /// File name of the template inside a templates directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::Edit => "edit.html",
            TemplateName::View => "view.html",
            TemplateName::List => "list.html",
        }
    }
}
