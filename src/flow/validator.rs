// src/flow/validator.rs

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::{EventDraft, EventInfo};

// --- Os 9 passos do assistente, na ordem ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    EventType,
    Info,
    AlcoholicDrinks,
    NonAlcoholicDrinks,
    OtherBeverages,
    Shots,
    Structure,
    Staff,
    Summary,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::EventType,
        Step::Info,
        Step::AlcoholicDrinks,
        Step::NonAlcoholicDrinks,
        Step::OtherBeverages,
        Step::Shots,
        Step::Structure,
        Step::Staff,
        Step::Summary,
    ];

    pub fn index(self) -> usize {
        Step::ALL.iter().position(|s| *s == self).unwrap()
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }
}

// ---
// Validação por passo
// ---
// Funções puras sobre o rascunho atual, sem efeito colateral nenhum.
// As regras canônicas: endereço é obrigatório, duração "00:00" (ou
// ilegível) não vale e o número de convidados precisa ser um inteiro
// positivo.
pub fn is_step_valid(step: Step, draft: &EventDraft) -> bool {
    match step {
        Step::EventType => !draft.selected_event_type.trim().is_empty(),
        Step::Info => info_is_valid(&draft.info),
        Step::AlcoholicDrinks => !draft.selected_alcoholic.is_empty(),
        Step::NonAlcoholicDrinks => !draft.selected_non_alcoholic.is_empty(),
        Step::OtherBeverages => draft.other_beverage_quantities.values().any(|q| *q > 0),
        Step::Shots => draft.shot_quantities.values().any(|q| *q > 0),
        Step::Structure => draft.selected_structure.is_some(),
        Step::Staff => draft.staff_quantities.values().any(|q| *q > 0),
        // Chegou no resumo, está valendo.
        Step::Summary => true,
    }
}

// Gate da navegação por salto: clicar direto no indicador do passo N só
// funciona se TODOS os anteriores estão válidos.
pub fn are_all_previous_steps_valid(target: Step, draft: &EventDraft) -> bool {
    Step::ALL[..target.index()].iter().all(|s| is_step_valid(*s, draft))
}

fn info_is_valid(info: &EventInfo) -> bool {
    !info.name.trim().is_empty()
        && NaiveDate::parse_from_str(info.date.trim(), "%Y-%m-%d").is_ok()
        && NaiveTime::parse_from_str(info.start_time.trim(), "%H:%M").is_ok()
        && info.guest_count.trim().parse::<u32>().map(|n| n > 0).unwrap_or(false)
        && duration_is_valid(&info.duration)
        && !info.address.trim().is_empty()
}

fn duration_is_valid(duration: &str) -> bool {
    match NaiveTime::parse_from_str(duration.trim(), "%H:%M") {
        // Evento de duração zero não existe.
        Ok(t) => t != NaiveTime::MIN,
        Err(_) => false,
    }
}
