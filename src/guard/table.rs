//! The portal's route table

use crate::auth::Role;
use serde::Serialize;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "role")]
pub enum Access {
    /// `/`: never rendered, always resolved to a home page
    Root,
    /// The login page, only for visitors without a session
    Guest,
    /// Any signed-in identity, optionally restricted to one role
    Protected(Option<Role>),
}

/// Which page a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Root,
    Login,
    PatientDashboard,
    Consultations,
    Medications,
    CurrentStage,
    ResearcherDashboard,
    PatientsMonitoring,
    RegisterResearch,
    Profile,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
    pub title: &'static str,
}

impl RouteDef {
    /// The role this route is restricted to, if any
    pub fn required_role(&self) -> Option<Role> {
        match self.access {
            Access::Protected(role) => role,
            Access::Root | Access::Guest => None,
        }
    }
}

const fn route(path: &'static str, page: Page, access: Access, title: &'static str) -> RouteDef {
    RouteDef {
        path,
        page,
        access,
        title,
    }
}

pub const ROUTES: &[RouteDef] = &[
    route("/", Page::Root, Access::Root, ""),
    route("/login", Page::Login, Access::Guest, "Entrar"),
    route("/patient", Page::PatientDashboard, Access::Protected(Some(Role::Patient)), "Painel do Paciente"),
    route("/patient/consultations", Page::Consultations, Access::Protected(Some(Role::Patient)), "Minhas Consultas"),
    route("/patient/medications", Page::Medications, Access::Protected(Some(Role::Patient)), "Meus Medicamentos"),
    route("/patient/current-stage", Page::CurrentStage, Access::Protected(Some(Role::Patient)), "Etapa Atual do Tratamento"),
    route("/researcher", Page::ResearcherDashboard, Access::Protected(Some(Role::Researcher)), "Painel do Pesquisador"),
    route("/researcher/patients", Page::PatientsMonitoring, Access::Protected(Some(Role::Researcher)), "Acompanhar Pacientes"),
    route("/researcher/register", Page::RegisterResearch, Access::Protected(Some(Role::Researcher)), "Cadastrar Pesquisa"),
    route("/profile", Page::Profile, Access::Protected(None), "Meu Perfil"),
    route("/settings", Page::Settings, Access::Protected(None), "Configurações"),
];

/// Find the route for a request path. A trailing slash is ignored.
pub fn lookup(path: &str) -> Option<&'static RouteDef> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|r| r.path == normalized)
}

/// Route definition for a page
pub fn route_for(page: Page) -> &'static RouteDef {
    ROUTES
        .iter()
        .find(|r| r.page == page)
        .unwrap_or(&ROUTES[0])
}
