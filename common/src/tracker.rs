//! Secuenciador de estados del pedido.
//!
//! Traduce un [`OrderStatus`] a una posición dentro de la lista fija de
//! etapas y arma la vista del indicador de progreso.

use serde::Serialize;

use crate::types::order_status::OrderStatus;

/// Una etapa del indicador de progreso.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub description: &'static str,
}

pub const STATUS_STEPS: [StatusStep; 4] = [
    StatusStep {
        status: OrderStatus::Confirmed,
        label: "Order Confirmed",
        description: "We've received your order.",
    },
    StatusStep {
        status: OrderStatus::Preparing,
        label: "Preparing Food",
        description: "The restaurant is preparing your meal.",
    },
    StatusStep {
        status: OrderStatus::OutForDelivery,
        label: "Out for Delivery",
        description: "Your order is on its way!",
    },
    StatusStep {
        status: OrderStatus::Delivered,
        label: "Delivered",
        description: "Enjoy your meal!",
    },
];

/// Position of a status on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePosition {
    /// Zero-based index into [`STATUS_STEPS`].
    Stage(usize),
    /// Out-of-band terminal state, shown without a track.
    Cancelled,
}

pub fn stage_position(status: OrderStatus) -> StagePosition {
    match STATUS_STEPS.iter().position(|step| step.status == status) {
        Some(index) => StagePosition::Stage(index),
        None => StagePosition::Cancelled,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Completed,
    Current,
}

impl StepState {
    pub fn for_index(index: usize, current: usize) -> Self {
        if index == current {
            StepState::Current
        } else if index < current {
            StepState::Completed
        } else {
            StepState::Pending
        }
    }

    /// Completed and current stages are both filled on the track.
    pub fn is_active(&self) -> bool {
        !matches!(self, StepState::Pending)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum TrackerView {
    Cancelled,
    Progress {
        current: StatusStep,
        estimated_delivery: Option<String>,
        steps: Vec<(StatusStep, StepState)>,
        /// Porción llena de la línea de progreso, entre 0 y 1.
        fill_ratio: f64,
    },
}

impl TrackerView {
    pub fn build(status: OrderStatus, estimated_delivery: Option<&str>) -> Self {
        let current_index = match stage_position(status) {
            StagePosition::Stage(index) => index,
            StagePosition::Cancelled => return TrackerView::Cancelled,
        };

        let steps = STATUS_STEPS
            .iter()
            .enumerate()
            .map(|(index, step)| (*step, StepState::for_index(index, current_index)))
            .collect();

        let estimated_delivery = estimated_delivery
            .filter(|_| status != OrderStatus::Delivered)
            .map(str::to_string);

        TrackerView::Progress {
            current: STATUS_STEPS[current_index],
            estimated_delivery,
            steps,
            fill_ratio: current_index as f64 / (STATUS_STEPS.len() - 1) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_indices_increase_along_the_track() {
        assert_eq!(stage_position(OrderStatus::Confirmed), StagePosition::Stage(0));
        assert_eq!(stage_position(OrderStatus::Preparing), StagePosition::Stage(1));
        assert_eq!(stage_position(OrderStatus::OutForDelivery), StagePosition::Stage(2));
        assert_eq!(stage_position(OrderStatus::Delivered), StagePosition::Stage(3));
    }

    #[test]
    fn test_cancelled_has_no_stage() {
        assert_eq!(stage_position(OrderStatus::Cancelled), StagePosition::Cancelled);
        assert_eq!(
            TrackerView::build(OrderStatus::Cancelled, Some("6:30 PM - 6:45 PM")),
            TrackerView::Cancelled
        );
    }

    #[test]
    fn test_out_for_delivery_fills_three_of_four_stages() {
        let view = TrackerView::build(OrderStatus::OutForDelivery, Some("6:30 PM - 6:45 PM"));
        let TrackerView::Progress { current, steps, fill_ratio, estimated_delivery } = view else {
            panic!("Expected a progress view");
        };

        assert_eq!(current.label, "Out for Delivery");
        assert_eq!(steps.len(), 4);
        let states: Vec<StepState> = steps.iter().map(|(_, state)| *state).collect();
        assert_eq!(
            states,
            vec![
                StepState::Completed,
                StepState::Completed,
                StepState::Current,
                StepState::Pending
            ]
        );
        assert_eq!(steps.iter().filter(|(_, s)| s.is_active()).count(), 3);
        assert!((fill_ratio - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(estimated_delivery.as_deref(), Some("6:30 PM - 6:45 PM"));
    }

    #[test]
    fn test_delivered_hides_the_estimate() {
        let view = TrackerView::build(OrderStatus::Delivered, Some("6:30 PM - 6:45 PM"));
        match view {
            TrackerView::Progress { estimated_delivery, fill_ratio, .. } => {
                assert!(estimated_delivery.is_none());
                assert_eq!(fill_ratio, 1.0);
            }
            TrackerView::Cancelled => panic!("Delivered orders stay on the track"),
        }
    }
}
