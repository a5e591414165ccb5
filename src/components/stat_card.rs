use yew::prelude::*;

use super::icons::{icon_credit_card, icon_trending_up, icon_wallet};

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    TrendingUp,
    CreditCard,
    Wallet,
}

/// Colour of the figure. Signed amounts go green or red.
#[derive(Clone, Copy, PartialEq)]
pub enum Tone {
    Neutral,
    Gain,
    Loss,
}

impl Tone {
    pub fn signed(value: f64) -> Self {
        if crate::state::dashboard::is_gain(value) {
            Tone::Gain
        } else {
            Tone::Loss
        }
    }

    fn class(self) -> &'static str {
        match self {
            Tone::Neutral => "text-[#1D617A] dark:text-sky-300",
            Tone::Gain => "text-green-600 dark:text-green-400",
            Tone::Loss => "text-red-600 dark:text-red-400",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub icon: StatIcon,
    #[prop_or(Tone::Neutral)]
    pub tone: Tone,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest uppercase">{ props.title.clone() }</p>
                <h3 class={format!("text-2xl font-bold tracking-tight {}", props.tone.class())}>{ props.value.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] dark:bg-slate-700 rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::TrendingUp => icon_trending_up(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                    }
                }
            </div>
        </div>
    }
}
