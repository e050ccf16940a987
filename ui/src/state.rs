use payloads::{EventId, UserId, responses};
use std::collections::HashMap;
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(responses::UserProfile),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Authentication (managed by use_authentication) ===
    pub auth_state: AuthState,

    // === Events (canonical store - managed by use_events + use_event) ===
    pub individual_events: HashMap<EventId, responses::Event>, // Single source of truth
    pub events_by_organizer: HashMap<UserId, Vec<EventId>>,    // Organizer index

    // === Promotion credits (managed by use_promo_credits) ===
    pub promo_credits: Option<responses::PromoCreditBalance>,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    pub fn current_user(&self) -> Option<&responses::UserProfile> {
        match &self.auth_state {
            AuthState::LoggedIn(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn has_events_loaded_for_organizer(
        &self,
        organizer_id: UserId,
    ) -> bool {
        self.events_by_organizer.contains_key(&organizer_id)
    }

    pub fn get_events_for_organizer(
        &self,
        organizer_id: UserId,
    ) -> Option<Vec<&responses::Event>> {
        self.events_by_organizer.get(&organizer_id).map(|event_ids| {
            event_ids
                .iter()
                .filter_map(|event_id| self.individual_events.get(event_id))
                .collect()
        })
    }

    pub fn set_events_for_organizer(
        &mut self,
        organizer_id: UserId,
        events: Vec<responses::Event>,
    ) {
        // Extract event IDs for the organizer index
        let event_ids: Vec<EventId> =
            events.iter().map(|event| event.id).collect();

        // Store individual events in the canonical store
        for event in events {
            self.individual_events.insert(event.id, event);
        }

        // Update the organizer index
        self.events_by_organizer.insert(organizer_id, event_ids);
    }

    pub fn has_event_loaded(&self, event_id: EventId) -> bool {
        self.individual_events.contains_key(&event_id)
    }

    pub fn get_event(&self, event_id: EventId) -> Option<&responses::Event> {
        self.individual_events.get(&event_id)
    }

    pub fn set_event(&mut self, event: responses::Event) {
        self.individual_events.insert(event.id, event);
    }

    pub fn set_promo_credits(
        &mut self,
        credits: responses::PromoCreditBalance,
    ) {
        self.promo_credits = Some(credits);
    }

    pub fn clear_events(&mut self) {
        self.events_by_organizer.clear();
        self.individual_events.clear();
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
        self.clear_events();
        self.promo_credits = None;
        // Future: clear other user-specific state here
    }
}
