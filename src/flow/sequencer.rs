// src/flow/sequencer.rs

use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::flow::validator::Step;

// Intervalo padrão entre um índice e o seguinte durante a animação.
pub const DEFAULT_HOP: Duration = Duration::from_millis(220);

// O que a UI lê para desenhar: o passo comitado, o passo visível durante
// a transição e o sentido do deslize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub current: Step,
    pub animated: Step,
    pub direction: i8,
}

struct SeqState {
    current: usize,
    animated: usize,
    direction: i8,
}

// ---
// StepSequencer
// ---
// Máquina de estados da transição de passos. `current` é o passo lógico
// comitado; `animated` anda um índice por vez em direção ao alvo para a
// UI deslizar painel por painel: um salto de 3 passos visita os 3
// índices intermediários.
//
// Uma chamada nova de `transition` SEMPRE supera a anterior: o token da
// transição em voo é cancelado e a cadeia antiga para no próximo await,
// sem nunca mais escrever no estado compartilhado.
pub struct StepSequencer {
    state: Mutex<SeqState>,
    token: Mutex<CancellationToken>,
    hop: Duration,
}

impl StepSequencer {
    pub fn new(start: Step, hop: Duration) -> Self {
        Self {
            state: Mutex::new(SeqState {
                current: start.index(),
                animated: start.index(),
                direction: 1,
            }),
            token: Mutex::new(CancellationToken::new()),
            hop,
        }
    }

    pub fn position(&self) -> StepPosition {
        let st = self.state.lock().unwrap();
        StepPosition {
            current: Step::from_index(st.current).unwrap(),
            animated: Step::from_index(st.animated).unwrap(),
            direction: st.direction,
        }
    }

    // Anima até `to` e comita. Devolve `false` se uma transição mais nova
    // superou esta antes do commit.
    pub async fn transition(&self, to: Step) -> bool {
        // Supera qualquer transição em voo e instala um token novo.
        let token = {
            let mut guard = self.token.lock().unwrap();
            guard.cancel();
            *guard = CancellationToken::new();
            guard.clone()
        };

        let target = to.index();
        let mut pos = {
            let mut st = self.state.lock().unwrap();
            // A geometria do deslize parte de onde a animação está AGORA,
            // não do passo lógico.
            st.direction = if target >= st.animated { 1 } else { -1 };
            st.animated
        };

        while pos != target {
            tokio::select! {
                _ = token.cancelled() => return false,
                _ = tokio::time::sleep(self.hop) => {}
            }
            pos = if target > pos { pos + 1 } else { pos - 1 };

            let mut st = self.state.lock().unwrap();
            if token.is_cancelled() {
                return false;
            }
            st.animated = pos;
        }

        // Pausa curta antes de comitar o passo lógico.
        tokio::select! {
            _ = token.cancelled() => return false,
            _ = tokio::time::sleep(self.hop / 2) => {}
        }

        let mut st = self.state.lock().unwrap();
        if token.is_cancelled() {
            return false;
        }
        st.current = target;
        st.animated = target;
        true
    }
}
