/// Field names as they appear on the wire and in validation reports.
pub struct PersonaFields;

impl PersonaFields {
    pub const DNI: &'static str = "dni";
    pub const NOMBRES: &'static str = "nombres";
    pub const APELLIDOS: &'static str = "apellidos";
    pub const FECHA_NACIMIENTO: &'static str = "fecha_nacimiento";
    pub const GENERO: &'static str = "genero";
    pub const CIUDAD: &'static str = "ciudad";
}
