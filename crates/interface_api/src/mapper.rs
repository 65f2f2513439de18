//! Domain to DTO mapping
//!
//! Pure functions; no I/O.

use domain_concert::{Booking, Concert, Credentials, Performer, Seat, User};

use crate::dto::{
    BookingDto, ConcertDto, ConcertSummaryDto, LoginRequest, PerformerDto, SeatDto, UserDto,
};

pub fn concert_to_dto(concert: &Concert) -> ConcertDto {
    ConcertDto {
        id: concert.id.value(),
        name: concert.name.clone(),
        image_name: concert.image_name.clone(),
        blurb: concert.blurb.clone(),
        dates: concert.dates.clone(),
        performers: concert.performers.iter().map(performer_to_dto).collect(),
    }
}

pub fn concert_to_summary(concert: &Concert) -> ConcertSummaryDto {
    ConcertSummaryDto {
        id: concert.id.value(),
        name: concert.name.clone(),
        image_name: concert.image_name.clone(),
    }
}

pub fn performer_to_dto(performer: &Performer) -> PerformerDto {
    PerformerDto {
        id: performer.id.value(),
        name: performer.name.clone(),
        image_name: performer.image_name.clone(),
        genre: performer.genre,
        blurb: performer.blurb.clone(),
    }
}

pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id.value(),
        username: user.username.clone(),
    }
}

pub fn booking_to_dto(booking: &Booking) -> BookingDto {
    BookingDto {
        id: booking.id.value(),
        concert_id: booking.concert_id.value(),
        date: booking.date,
        seats: booking.seats.iter().map(seat_to_dto).collect(),
    }
}

pub fn seat_to_dto(seat: &Seat) -> SeatDto {
    SeatDto {
        label: seat.label.clone(),
        price: seat.price,
    }
}

pub fn login_to_credentials(request: LoginRequest) -> Credentials {
    Credentials::new(request.username, request.password)
}
